use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Per-section tally of file changes.
///
/// `total` is not a field: it is derived from the three stored counts on
/// every read, so it can never drift out of sync with them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: u32,
    pub deleted: u32,
    pub modified: u32,
}

impl ChangeSet {
    pub fn total(&self) -> u32 {
        self.added + self.deleted + self.modified
    }
}

impl Serialize for ChangeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("ChangeSet", 4)?;
        s.serialize_field("added", &self.added)?;
        s.serialize_field("deleted", &self.deleted)?;
        s.serialize_field("modified", &self.modified)?;
        s.serialize_field("total", &self.total())?;
        s.end()
    }
}

/// Structured summary of one `git status` report.
///
/// Built up incrementally during a parse and handed to the caller whole;
/// untracked files are folded into `unstaged_changes` as additions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStatus {
    pub local_branch_name: String,
    pub remote_branch_name: String,
    pub local_new_commits: u32,
    pub remote_new_commits: u32,
    pub staged_changes: ChangeSet,
    pub unstaged_changes: ChangeSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_tracks_mutation() {
        let mut set = ChangeSet::default();
        assert_eq!(set.total(), 0);

        set.added = 2;
        set.deleted = 1;
        assert_eq!(set.total(), 3);

        set.modified = 4;
        assert_eq!(set.total(), 7);
    }

    #[test]
    fn serialized_changeset_carries_the_derived_total() {
        let set = ChangeSet {
            added: 1,
            deleted: 0,
            modified: 2,
        };
        let json: serde_json::Value = serde_json::to_value(set).unwrap();
        assert_eq!(json["added"], 1);
        assert_eq!(json["deleted"], 0);
        assert_eq!(json["modified"], 2);
        assert_eq!(json["total"], 3);
    }
}
