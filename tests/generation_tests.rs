/// Generation integration tests: sampling from trained and arbitrary databases.

use frame_grammar::config::SamplerConfig;
use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::extractor::ParsedBatch;
use frame_grammar::core::sampler::{generate, FrameSampler};
use frame_grammar::schema::frame::{Frame, FrameEntry, HEAD, ROOT};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

fn sample_db() -> FrameDatabase {
    let text = std::fs::read_to_string("tests/fixtures/parsed_sample.txt").unwrap();
    ParsedBatch::new(&text).frames().collect()
}

#[test]
fn scenario_database_generates_fixed_sentence() {
    let db = FrameDatabase::load(std::path::Path::new("tests/fixtures/db.json")).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    assert_eq!(
        generate(&mut rng, "chase", Some("VBP"), &db, 0, false),
        "cats chase mice"
    );
    assert_eq!(FrameSampler::new(&db).generate(&mut rng), "cats chase mice");
}

#[test]
fn sample_generation_stays_within_observed_sentences() {
    let db = sample_db();
    let sampler = FrameSampler::new(&db);
    let possible: BTreeSet<&str> = [
        "The cat sat on the mat",
        "the cat sat on the mat",
        "A well-known dog chased The cat to Boston",
        "A well-known dog chased the cat to Boston",
        "Mice sleep [ quietly ]",
        "Birds sang and Birds danced",
    ]
    .into_iter()
    .collect();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut seen = BTreeSet::new();
    for _ in 0..300 {
        let sentence = sampler.generate(&mut rng);
        assert!(possible.contains(sentence.as_str()), "unexpected: {sentence}");
        seen.insert(sentence);
    }
    assert_eq!(seen.len(), possible.len());
}

#[test]
fn same_seed_same_output() {
    let db = sample_db();
    let sampler = FrameSampler::new(&db);
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20).map(|_| sampler.generate(&mut rng)).collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn sampler_is_shareable_across_threads() {
    let db = sample_db();
    let sampler = FrameSampler::new(&db);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    sampler.generate(&mut rng)
                })
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap().contains(ROOT));
        }
    });
}

#[test]
fn cyclic_database_terminates() {
    let mut db = FrameDatabase::new();
    db.insert(
        "a",
        "X",
        Frame::new(vec![
            FrameEntry::new(HEAD, "X", "a"),
            FrameEntry::new("dep", "X", "b"),
            FrameEntry::new("dep", "X", "a"),
        ]),
    );
    db.insert(
        "b",
        "X",
        Frame::new(vec![
            FrameEntry::new("dep", "X", "a"),
            FrameEntry::new(HEAD, "X", "b"),
        ]),
    );
    let mut rng = StdRng::seed_from_u64(0);
    let text = FrameSampler::new(&db).generate_from(&mut rng, "a", Some("X"));
    assert!(text.split(' ').all(|w| w == "a" || w == "b"));
    assert!(text.starts_with("a "));
}

/// Lexemes other than the sentinels are lowercase, so any `ROOT` substring
/// in the output can only come from the sentinel.
fn lexeme() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(ROOT.to_string()),
        Just("-LSB-".to_string()),
        Just("-RSB-".to_string()),
        "[a-e]{1,3}",
    ]
}

fn entry() -> impl Strategy<Value = FrameEntry> {
    (
        prop_oneof![
            Just(HEAD.to_string()),
            Just("nsubj".to_string()),
            Just("prep_in".to_string()),
        ],
        prop_oneof![Just("NN".to_string()), Just("VB".to_string()), Just(ROOT.to_string())],
        lexeme(),
    )
        .prop_map(|(relation, pos, lexeme)| FrameEntry::new(relation, pos, lexeme))
}

/// Arbitrary databases, including ones that reference themselves and ones
/// whose `ROOT` entries are not heads.
fn database() -> impl Strategy<Value = FrameDatabase> {
    prop::collection::vec(
        (
            lexeme(),
            prop_oneof![Just("NN".to_string()), Just(ROOT.to_string())],
            prop::collection::vec(entry(), 1..5),
        ),
        0..12,
    )
    .prop_map(|frames| {
        let mut db = FrameDatabase::new();
        for (lexeme, pos, entries) in frames {
            db.insert(lexeme, pos, Frame::new(entries));
        }
        db
    })
}

/// Longest possible output, in words, for a fan-out of at most `width`
/// entries per frame: every level multiplies by `width`, and the word plus
/// the embedded preposition count as two.
fn word_bound(width: usize, max_depth: usize) -> usize {
    2 * width.pow(max_depth as u32 + 2)
}

proptest! {
    #[test]
    fn generation_terminates_and_never_leaks_root(db in database(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = FrameSampler::new(&db).generate(&mut rng);
        prop_assert!(!text.contains(ROOT), "leaked ROOT in {:?}", text);
        prop_assert!(text.split(' ').count() <= word_bound(4, 3));
    }

    #[test]
    fn depth_bound_limits_output(db in database(), seed in any::<u64>(), start in lexeme()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let shallow = FrameSampler::with_config(&db, &SamplerConfig { max_depth: 0 });
        let text = shallow.generate_from(&mut rng, &start, None);
        prop_assert!(text.split(' ').count() <= word_bound(4, 0));
    }

    #[test]
    fn base_case_maps_brackets_and_hides_root(word in "[A-Za-z-]{1,8}") {
        let db = FrameDatabase::new();
        let mut rng = StdRng::seed_from_u64(0);
        let expected = match word.as_str() {
            "-LSB-" => "[".to_string(),
            "-RSB-" => "]".to_string(),
            ROOT => String::new(),
            _ => word.clone(),
        };
        prop_assert_eq!(generate(&mut rng, &word, None, &db, 0, false), expected);
    }
}
