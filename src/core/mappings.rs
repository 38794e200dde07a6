//! Mapping table — legacy identifier spellings and their canonical snake_case forms.
//!
//! Both the camelCase and the flattened all-lowercase spelling of each column
//! map to the same underscored target. The table is built once at startup and
//! never mutated during a run.

/// Legacy spelling → canonical spelling, in insertion order.
///
/// Entries where legacy equals canonical are identity mappings kept only for
/// traceability; the rewrite engine skips them.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // movies
    ("releaseDate", "release_date"),
    ("releasedate", "release_date"),
    ("originalTitle", "original_title"),
    ("originaltitle", "original_title"),
    ("cplTitleDate", "cpl_title_date"),
    ("cpltitledate", "cpl_title_date"),
    ("posterPath", "poster_path"),
    ("posterpath", "poster_path"),
    ("createdAt", "created_at"),
    ("createdat", "created_at"),
    ("updatedAt", "updated_at"),
    ("updatedat", "updated_at"),
    // submissions
    ("movieId", "movie_id"),
    ("movieid", "movie_id"),
    ("cplTitle", "cpl_title"),
    ("cpltitle", "cpl_title"),
    ("sourceOther", "source_other"),
    ("sourceother", "source_other"),
    ("submitterIp", "submitter_ip"),
    ("submitterip", "submitter_ip"),
    // post-credit scenes
    ("postCreditScenes", "post_credit_scenes"),
    ("postcreditscenes", "post_credit_scenes"),
    ("sceneOrder", "scene_order"),
    ("sceneorder", "scene_order"),
    ("startTime", "start_time"),
    ("starttime", "start_time"),
    ("endTime", "end_time"),
    ("endtime", "end_time"),
    // comments
    ("commentId", "comment_id"),
    ("commentid", "comment_id"),
    ("commentText", "comment_text"),
    ("commenttext", "comment_text"),
    // shared columns
    ("submissionId", "submission_id"),
    ("submissionid", "submission_id"),
    ("voteType", "vote_type"),
    ("votetype", "vote_type"),
    ("ipAddress", "ip_address"),
    ("ipaddress", "ip_address"),
    ("passwordHash", "password_hash"),
    ("passwordhash", "password_hash"),
    ("reportType", "report_type"),
    ("reporttype", "report_type"),
    ("entityId", "entity_id"),
    ("entityid", "entity_id"),
    ("bannedBy", "banned_by"),
    ("bannedby", "banned_by"),
    ("likeCount", "like_count"),
    ("likecount", "like_count"),
    ("dislikeCount", "dislike_count"),
    ("dislikecount", "dislike_count"),
    ("commentCount", "comment_count"),
    ("commentcount", "comment_count"),
    ("userLiked", "user_liked"),
    ("userliked", "user_liked"),
    ("userDisliked", "user_disliked"),
    ("userdisliked", "user_disliked"),
    ("userVote", "user_vote"),
    ("uservote", "user_vote"),
    ("lastUpdate", "last_update"),
    ("lastupdate", "last_update"),
    ("tmdbId", "tmdb_id"),
    ("tmdbid", "tmdb_id"),
    ("includeAdult", "include_adult"),
];

/// One legacy → canonical pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub legacy: String,
    pub canonical: String,
}

impl MappingEntry {
    /// Identity mappings are documentation-only and never applied.
    pub fn is_identity(&self) -> bool {
        self.legacy == self.canonical
    }
}

/// Immutable lookup table over the mapping entries.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(legacy, canonical)| MappingEntry {
                legacy: legacy.to_string(),
                canonical: canonical.to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn with_default_mappings() -> Self {
        Self::new(DEFAULT_MAPPINGS)
    }

    pub fn lookup(&self, legacy: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.legacy == legacy)
            .map(|e| e.canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, longest legacy spelling first; ties keep insertion order.
    ///
    /// The length-descending order is an invariant of the rewrite engine:
    /// when one legacy spelling is a substring of another, the longer one's
    /// rewrite must run first so the shorter entry never corrupts its token.
    pub fn sorted_entries(&self) -> Vec<&MappingEntry> {
        let mut sorted: Vec<&MappingEntry> = self.entries.iter().collect();
        // Stable sort preserves insertion order among equal lengths
        sorted.sort_by(|a, b| b.legacy.len().cmp(&a.legacy.len()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_both_spellings() {
        let table = MappingTable::with_default_mappings();
        assert_eq!(table.lookup("releaseDate"), Some("release_date"));
        assert_eq!(table.lookup("releasedate"), Some("release_date"));
        assert_eq!(table.lookup("movieId"), Some("movie_id"));
        assert_eq!(table.lookup("nonexistentColumn"), None);
    }

    #[test]
    fn sorted_entries_are_length_descending() {
        let table = MappingTable::with_default_mappings();
        let sorted = table.sorted_entries();
        for pair in sorted.windows(2) {
            assert!(
                pair[0].legacy.len() >= pair[1].legacy.len(),
                "'{}' sorted before shorter '{}'",
                pair[0].legacy,
                pair[1].legacy
            );
        }
        // postCreditScenes is the longest spelling in the default table
        assert_eq!(sorted[0].legacy, "postCreditScenes");
    }

    #[test]
    fn sorted_entries_break_ties_by_insertion_order() {
        let table = MappingTable::new(&[("aaa", "x"), ("bbb", "y"), ("cc", "z")]);
        let sorted = table.sorted_entries();
        assert_eq!(sorted[0].legacy, "aaa");
        assert_eq!(sorted[1].legacy, "bbb");
        assert_eq!(sorted[2].legacy, "cc");
    }

    #[test]
    fn identity_entries_are_flagged() {
        let table = MappingTable::new(&[("already_snake", "already_snake"), ("camelCase", "camel_case")]);
        let sorted = table.sorted_entries();
        assert!(sorted.iter().any(|e| e.is_identity()));
        assert!(sorted.iter().any(|e| !e.is_identity()));
    }

    #[test]
    fn default_table_has_no_duplicate_legacy_spellings() {
        let table = MappingTable::with_default_mappings();
        let mut seen = std::collections::HashSet::new();
        for entry in table.sorted_entries() {
            assert!(
                seen.insert(entry.legacy.clone()),
                "duplicate legacy spelling '{}'",
                entry.legacy
            );
        }
    }

    #[test]
    fn canonical_spellings_never_collide_with_legacy_spellings() {
        // Idempotency of the engine depends on no canonical form appearing in
        // the table as a legacy spelling.
        let table = MappingTable::with_default_mappings();
        for entry in table.sorted_entries() {
            assert!(
                table.lookup(&entry.canonical).is_none(),
                "canonical '{}' is also a legacy spelling",
                entry.canonical
            );
        }
    }
}
