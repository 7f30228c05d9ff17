//! 商品⇔フォルダ照合モジュール
//!
//! 商品名のトークン集合が、フォルダ名のトークン集合の部分集合であれば候補とする。
//! フォルダ名には商品名に加えて説明語が含まれるのが普通なので、
//! 余分なフォルダ側トークンは許容する。
//!
//! 候補が複数ある場合は衝突として報告し、自動では解決しない。

use crate::types::{CatalogEntry, Folder};
use serde::Serialize;

/// トークンが得られなかった商品の未照合理由
pub const REASON_NO_TOKENS: &str = "no tokens";

/// 1商品の照合結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched {
        entry: CatalogEntry,
        folder: Folder,
    },
    Unmatched {
        entry: CatalogEntry,
        reason: Option<String>,
    },
    Collision {
        entry: CatalogEntry,
        candidates: Vec<String>,
    },
}

impl MatchResult {
    pub fn entry(&self) -> &CatalogEntry {
        match self {
            MatchResult::Matched { entry, .. }
            | MatchResult::Unmatched { entry, .. }
            | MatchResult::Collision { entry, .. } => entry,
        }
    }
}

/// 照合成功
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    #[serde(rename = "product")]
    pub entry: CatalogEntry,
    pub folder: Folder,
}

/// 未照合
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedEntry {
    #[serde(rename = "product")]
    pub entry: CatalogEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 衝突（候補フォルダが複数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionEntry {
    #[serde(rename = "product")]
    pub entry: CatalogEntry,
    pub folders: Vec<String>,
}

/// 照合結果の3分割
///
/// 各商品はちょうど1つの区分に入る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: Vec<MatchedPair>,
    pub unmatched: Vec<UnmatchedEntry>,
    pub collisions: Vec<CollisionEntry>,
}

impl MatchReport {
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len() + self.collisions.len()
    }

    fn push(&mut self, result: MatchResult) {
        match result {
            MatchResult::Matched { entry, folder } => {
                self.matched.push(MatchedPair { entry, folder })
            }
            MatchResult::Unmatched { entry, reason } => {
                self.unmatched.push(UnmatchedEntry { entry, reason })
            }
            MatchResult::Collision { entry, candidates } => self.collisions.push(CollisionEntry {
                entry,
                folders: candidates,
            }),
        }
    }
}

/// 1商品をフォルダ群と照合
pub fn classify(entry: &CatalogEntry, folders: &[Folder]) -> MatchResult {
    let tokens = entry.tokens();
    if tokens.is_empty() {
        return MatchResult::Unmatched {
            entry: entry.clone(),
            reason: Some(REASON_NO_TOKENS.to_string()),
        };
    }

    let candidates: Vec<&Folder> = folders
        .iter()
        .filter(|f| tokens.is_subset(&f.tokens))
        .collect();

    match candidates.as_slice() {
        [] => MatchResult::Unmatched {
            entry: entry.clone(),
            reason: None,
        },
        [folder] => MatchResult::Matched {
            entry: entry.clone(),
            folder: (*folder).clone(),
        },
        many => MatchResult::Collision {
            entry: entry.clone(),
            candidates: many.iter().map(|f| f.name.clone()).collect(),
        },
    }
}

/// 全商品をフォルダ群と照合し、3区分に分割
pub fn match_entries(entries: &[CatalogEntry], folders: &[Folder]) -> MatchReport {
    let mut report = MatchReport::default();
    for entry in entries {
        report.push(classify(entry, folders));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry {
            id: format!("gid://shopify/Product/{}", title.len()),
            title: title.to_string(),
            handle: title.to_lowercase().replace(' ', "-"),
        }
    }

    fn folder(name: &str, images: &[&str]) -> Folder {
        Folder::new(
            name,
            PathBuf::from("/root").join(name).join("Etulle Shopify"),
            images.iter().map(PathBuf::from).collect(),
        )
    }

    #[test]
    fn test_single_candidate_is_matched() {
        let folders = vec![folder("Red Vase Large", &["a.jpg", "b.jpg"])];
        let result = classify(&entry("Red Vase"), &folders);

        match result {
            MatchResult::Matched { folder, .. } => {
                assert_eq!(folder.name, "Red Vase Large");
                assert_eq!(folder.images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
            }
            other => panic!("expected Matched, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_candidates_is_collision() {
        let folders = vec![folder("Red Vase", &["1.jpg"]), folder("Blue Vase", &["1.jpg"])];
        let result = classify(&entry("Vase"), &folders);

        assert_eq!(
            result,
            MatchResult::Collision {
                entry: entry("Vase"),
                candidates: vec!["Red Vase".to_string(), "Blue Vase".to_string()],
            }
        );
    }

    #[test]
    fn test_no_candidate_is_unmatched_without_reason() {
        let folders = vec![folder("Green Bowl", &["1.jpg"])];
        let result = classify(&entry("Red Vase"), &folders);
        assert_eq!(
            result,
            MatchResult::Unmatched {
                entry: entry("Red Vase"),
                reason: None,
            }
        );
    }

    #[test]
    fn test_empty_token_set_is_unmatched_with_reason() {
        let folders = vec![folder("Anything", &["1.jpg"])];
        match classify(&entry("-- !! --"), &folders) {
            MatchResult::Unmatched { reason, .. } => {
                assert_eq!(reason.as_deref(), Some(REASON_NO_TOKENS));
            }
            other => panic!("expected Unmatched, got {:?}", other),
        }
    }

    #[test]
    fn test_folder_missing_a_token_never_matches() {
        // "vase" のみ一致、"red" が欠けている
        let folders = vec![folder("Blue Vase Large", &["1.jpg"])];
        assert!(matches!(
            classify(&entry("Red Vase"), &folders),
            MatchResult::Unmatched { .. }
        ));
    }

    #[test]
    fn test_match_is_case_and_punctuation_insensitive() {
        let folders = vec![folder("RED-VASE (large)", &["1.jpg"])];
        assert!(matches!(
            classify(&entry("red vase"), &folders),
            MatchResult::Matched { .. }
        ));
    }

    #[test]
    fn test_match_entries_is_partition() {
        let entries = vec![
            entry("Red Vase"),
            entry("Vase"),
            entry("Green Bowl"),
            entry("???"),
            entry("Blue Vase"),
        ];
        let folders = vec![
            folder("Red Vase Large", &["1.jpg"]),
            folder("Blue Vase", &["1.jpg"]),
        ];

        let report = match_entries(&entries, &folders);

        assert_eq!(report.total(), entries.len());
        assert_eq!(report.matched.len(), 2);
        assert_eq!(report.unmatched.len(), 2);
        assert_eq!(report.collisions.len(), 1);

        for e in &entries {
            let hits = report.matched.iter().filter(|m| &m.entry == e).count()
                + report.unmatched.iter().filter(|u| &u.entry == e).count()
                + report.collisions.iter().filter(|c| &c.entry == e).count();
            assert_eq!(hits, 1, "{} appears {} times", e.title, hits);
        }
    }

    #[test]
    fn test_subset_law_holds_for_every_matched_pair() {
        let entries = vec![entry("Red Vase"), entry("Large"), entry("Bowl Green")];
        let folders = vec![
            folder("Red Vase Large", &["1.jpg"]),
            folder("Green Bowl Small", &["1.jpg"]),
        ];

        let report = match_entries(&entries, &folders);
        for pair in &report.matched {
            assert!(pair.entry.tokens().is_subset(&pair.folder.tokens));
        }
        for collision in &report.collisions {
            for name in &collision.folders {
                let f = folders.iter().find(|f| &f.name == name).unwrap();
                assert!(collision.entry.tokens().is_subset(&f.tokens));
            }
        }
    }

    #[test]
    fn test_match_report_serialization_shape() {
        let folders = vec![folder("Red Vase", &["1.jpg"]), folder("Blue Vase", &["1.jpg"])];
        let report = match_entries(&[entry("Vase"), entry("Cup")], &folders);

        let collisions = serde_json::to_value(&report.collisions).unwrap();
        assert_eq!(collisions[0]["product"]["title"], "Vase");
        assert_eq!(collisions[0]["folders"], serde_json::json!(["Red Vase", "Blue Vase"]));

        let unmatched = serde_json::to_value(&report.unmatched).unwrap();
        assert_eq!(unmatched[0]["product"]["title"], "Cup");
        assert!(unmatched[0].get("reason").is_none());
    }
}
