use super::{chunk_bounds, Located, ScriptRepository};
use crate::error::{script_error, ScriptError};
use crate::signature::{Signature, SignatureResolver, SourceLocation};
use regex::Regex;
use std::collections::HashMap;

fn two_record_repo() -> ScriptRepository {
    ScriptRepository::from_pairs([("A", ""), ("B", "x\ny\nz")])
}

fn scene_repo() -> ScriptRepository {
    ScriptRepository::from_pairs([
        ("Vocab", "module Vocab\n  ShopBuy = \"Buy\"\nend\n"),
        ("Scene_Base", "class Scene_Base\n  def main\n  end\nend\n"),
        ("Scene_Utils", "module Scene_Utils\nend\n"),
        ("( Insert here )", "   \n"),
        ("Scene_Map", "class Scene_Map < Scene_Base\nend\n"),
        ("Main", "rgss_main { SceneManager.run }\n"),
    ])
}

struct FakeResolver(HashMap<String, SourceLocation>);

impl SignatureResolver for FakeResolver {
    fn resolve(&self, signature: &Signature) -> Option<SourceLocation> {
        self.0.get(&signature.to_string()).copied()
    }
}

#[test]
fn named_skips_blank_records() {
    let repo = two_record_repo();
    assert_eq!(repo.named(""), vec!["B"]);
}

#[test]
fn named_keeps_every_non_blank_match_in_order() {
    let repo = scene_repo();
    assert_eq!(
        repo.named("Scene_"),
        vec!["Scene_Base", "Scene_Utils", "Scene_Map"]
    );
    assert!(repo.named("Insert").is_empty());
    assert!(repo.named("Nothing").is_empty());
}

#[test]
fn named_matching_uses_the_pattern() {
    let repo = scene_repo();
    let pattern = Regex::new("^Scene_(Base|Map)$").unwrap();
    assert_eq!(repo.named_matching(&pattern), vec!["Scene_Base", "Scene_Map"]);
}

#[test]
fn defining_matches_class_and_module_forms() {
    let repo = scene_repo();
    assert_eq!(
        repo.defining("Scene_"),
        vec!["Scene_Base", "Scene_Utils", "Scene_Map"]
    );
    assert_eq!(repo.defining("Vocab"), vec!["Vocab"]);
}

#[test]
fn defining_strips_namespace() {
    let repo = ScriptRepository::from_pairs([
        ("Foo", "module Foo\n  class Bar\n  end\nend\n"),
        ("Other", "class Baz\nend\n"),
    ]);
    assert_eq!(repo.defining("Foo::Bar"), vec!["Foo"]);
    assert!(repo.defining("Foo::Qux").is_empty());
}

#[test]
fn defining_ignores_references_without_keyword() {
    let repo = scene_repo();
    // "Scene_Base" appears after "<" in Scene_Map but not as "class Scene_Base".
    assert_eq!(repo.defining("Scene_Base"), vec!["Scene_Base"]);
}

#[test]
fn chunk_with_zero_surround_is_one_line() {
    let repo = two_record_repo();
    for (line, expected) in ["x", "y", "z"].iter().enumerate() {
        let chunk = repo.chunk_around("B", line, 0).unwrap();
        assert_eq!(chunk.lines, [expected.to_string()]);
        assert_eq!(chunk.count, 1);
        assert_eq!(chunk.start, line);
    }
}

#[test]
fn chunk_is_centered_when_room_allows() {
    let text: Vec<String> = (0..20).map(|n| format!("line {n}")).collect();
    let repo = ScriptRepository::from_pairs([("Long", text.join("\n"))]);
    let chunk = repo.chunk_around("Long", 10, 3).unwrap();
    assert_eq!(chunk.start, 7);
    assert_eq!(chunk.count, 7);
    assert_eq!(chunk.lines.first().map(String::as_str), Some("line 7"));
    assert_eq!(chunk.lines.last().map(String::as_str), Some("line 13"));
}

#[test]
fn chunk_bounds_stay_inside_text() {
    for len in 0..6usize {
        for line in 0..12usize {
            for surround in 0..12usize {
                let (start, end) = chunk_bounds(len, line, surround);
                assert!(start <= end, "len={len} line={line} surround={surround}");
                assert!(end <= len, "len={len} line={line} surround={surround}");
            }
        }
    }
}

#[test]
fn chunk_bounds_survive_extreme_inputs() {
    let huge = [i64::MAX as usize - 1, i64::MAX as usize, usize::MAX - 1, usize::MAX];
    for len in [0usize, 1, 3, 20] {
        for &line in &huge {
            for surround in [0usize, 1, 5, i64::MAX as usize, usize::MAX] {
                let (start, end) = chunk_bounds(len, line, surround);
                assert!(start <= end, "len={len} line={line} surround={surround}");
                assert!(end <= len, "len={len} line={line} surround={surround}");
            }
        }
        for surround in huge {
            assert_eq!(chunk_bounds(len, 0, surround), (0, len), "len={len}");
        }
    }
}

#[test]
fn chunk_past_the_end_is_empty() {
    let repo = two_record_repo();
    for line in [3, 4, 100, i64::MAX as usize, usize::MAX] {
        let chunk = repo.chunk_around("B", line, 0).unwrap();
        assert!(chunk.lines.is_empty(), "line={line}");
        assert_eq!(chunk.count, 0);
        assert_eq!(chunk.start, 3);
    }
}

#[test]
fn huge_line_with_surround_shows_the_tail() {
    let repo = two_record_repo();
    let chunk = repo.chunk_around("B", i64::MAX as usize, 1).unwrap();
    assert_eq!(chunk.lines, ["z".to_string()]);
    assert_eq!(chunk.start, 2);
}

#[test]
fn oversized_surround_returns_whole_script() {
    let repo = two_record_repo();
    let chunk = repo.chunk_around("B", 1, 50).unwrap();
    assert_eq!(chunk.count, 3);
    assert_eq!(chunk.start, 0);
}

#[test]
fn chunk_uses_first_name_match_even_if_blank() {
    let repo = two_record_repo();
    let chunk = repo.chunk_around("A", 0, 2).unwrap();
    assert_eq!(chunk.count, 0);
}

#[test]
fn chunk_without_match_is_not_found() {
    let repo = two_record_repo();
    let err = repo.chunk_around("Missing", 0, 1).unwrap_err();
    assert_eq!(script_error(&err), Some(&ScriptError::not_found("Missing")));
}

#[test]
fn locate_maps_origin_and_converts_line() {
    let repo = scene_repo();
    let resolver = FakeResolver(HashMap::from([(
        "Scene_Base#main".to_string(),
        SourceLocation { origin: 1, line: 2 },
    )]));
    let located = repo.locate_by_signature("Scene_Base#main", &resolver).unwrap();
    assert_eq!(located, Located { record: 1, line: 1 });
}

#[test]
fn locate_reports_unresolved_signatures() {
    let repo = scene_repo();
    let resolver = FakeResolver(HashMap::from([(
        "Ghost#walk".to_string(),
        SourceLocation {
            origin: 99,
            line: 1,
        },
    )]));

    for signature in ["Scene_Base#update", "not a signature", "Ghost#walk"] {
        let err = repo.locate_by_signature(signature, &resolver).unwrap_err();
        assert!(
            matches!(
                script_error(&err),
                Some(ScriptError::UnresolvedSignature { .. })
            ),
            "{signature}: {err}"
        );
    }
}
