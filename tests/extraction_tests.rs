/// Extraction integration tests: parser output to frame database.

use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::extractor::{ExtractError, ParsedBatch};
use frame_grammar::core::lint::lint;
use frame_grammar::schema::frame::{FrameEntry, FrameTriple, HEAD, ROOT};

fn sample() -> String {
    std::fs::read_to_string("tests/fixtures/parsed_sample.txt").unwrap()
}

fn sample_db() -> FrameDatabase {
    ParsedBatch::new(&sample()).frames().collect()
}

#[test]
fn scenario_triples_match_exactly() {
    let text = "cats/NNS chase/VBP mice/NNS\n\
                nsubj(chase-2, cats-1)\n\
                dobj(chase-2, mice-3)\n";
    let mut triples: Vec<FrameTriple> = ParsedBatch::new(text).frames().collect();
    triples.sort_by(|a, b| a.lexeme.cmp(&b.lexeme));

    let summary: Vec<(&str, &str, Vec<FrameEntry>)> = triples
        .iter()
        .map(|t| (t.lexeme.as_str(), t.pos.as_str(), t.frame.entries.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("cats", "NNS", vec![FrameEntry::new(HEAD, "NNS", "cats")]),
            (
                "chase",
                "VBP",
                vec![
                    FrameEntry::new("nsubj", "NNS", "cats"),
                    FrameEntry::new(HEAD, "VBP", "chase"),
                    FrameEntry::new("dobj", "NNS", "mice"),
                ]
            ),
            ("mice", "NNS", vec![FrameEntry::new(HEAD, "NNS", "mice")]),
        ]
    );
}

#[test]
fn sample_sentences_all_extract() {
    let text = sample();
    let results: Vec<_> = ParsedBatch::new(&text).sentences().collect();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(Result::is_ok));
}

#[test]
fn sample_database_shape() {
    let db = sample_db();
    assert_eq!(db.frame_count(), 24);
    assert_eq!(db.lexeme_count(), 19);
    assert_eq!(db.frames(ROOT, ROOT).unwrap().len(), 4);
    assert_eq!(db.frames("cat", "NN").unwrap().len(), 2);
    assert_eq!(db.frames("the", "DT").unwrap().len(), 2);
}

#[test]
fn every_frame_has_one_head_naming_its_key() {
    let db = sample_db();
    for (lexeme, groups) in db.iter() {
        for (pos, frames) in groups {
            assert!(!frames.is_empty());
            for frame in frames {
                assert_eq!(frame.head_count(), 1);
                let head = frame.head().unwrap();
                assert_eq!(head.lexeme, lexeme);
                assert_eq!(&head.pos, pos);
            }
        }
    }
    assert!(lint(&db).is_clean());
}

#[test]
fn frames_follow_sentence_order() {
    let db = sample_db();
    assert_eq!(
        db.frames("quietly", "RB").unwrap()[0].entries,
        vec![
            FrameEntry::new("dep", "-LRB-", "-LSB-"),
            FrameEntry::new(HEAD, "RB", "quietly"),
            FrameEntry::new("dep", "-RRB-", "-RSB-"),
        ]
    );
    assert_eq!(
        db.frames("chased", "VBD").unwrap()[0].entries,
        vec![
            FrameEntry::new("nsubj", "NN", "dog"),
            FrameEntry::new(HEAD, "VBD", "chased"),
            FrameEntry::new("dobj", "NN", "cat"),
            FrameEntry::new("prep_to", "NNP", "Boston"),
        ]
    );
    assert_eq!(
        db.frames("dog", "NN").unwrap()[0].entries,
        vec![
            FrameEntry::new("det", "DT", "A"),
            FrameEntry::new("amod", "JJ", "well-known"),
            FrameEntry::new(HEAD, "NN", "dog"),
        ]
    );
}

#[test]
fn shared_dependent_gets_a_single_leaf_frame() {
    let db = sample_db();
    assert_eq!(db.frames("Birds", "NNS").unwrap().len(), 1);
    assert_eq!(
        db.frames("danced", "VBD").unwrap()[0].entries,
        vec![
            FrameEntry::new("nsubj", "NNS", "Birds"),
            FrameEntry::new(HEAD, "VBD", "danced"),
        ]
    );
}

#[test]
fn copy_nodes_merge_with_their_original() {
    let text = "Bill/NNP went/VBD home/NN and/CC Sue/NNP work/NN ./.\n\n\
                nsubj(went-2, Bill-1)\n\
                root(ROOT-0, went-2)\n\
                dobj(went-2, home-3)\n\
                conj_and(went-2, went-2')\n\
                nsubj(went-2', Sue-5)\n\
                dobj(went-2', work-6)\n\n";
    let db: FrameDatabase = ParsedBatch::new(text).frames().collect();
    let went = db.frames("went", "VBD").unwrap();
    assert_eq!(went.len(), 1);
    assert_eq!(went[0].head_count(), 1);
    assert_eq!(went[0].len(), 6);
}

#[test]
fn bad_sentence_does_not_poison_batch() {
    let text = format!("oops/NN\n\nnsubj(x-9, oops-1)\n\n{}", sample());
    let results: Vec<_> = ParsedBatch::new(&text).sentences().collect();
    assert_eq!(results.len(), 5);
    assert!(matches!(
        results[0],
        Err(ExtractError::IndexOutOfRange { sentence: 1, index: 9, .. })
    ));
    let db: FrameDatabase = ParsedBatch::new(&text).frames().collect();
    assert_eq!(db, sample_db());
}
