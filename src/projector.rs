use crate::app::{SkillStatus, Summary};

/// One display-ready row of the skills table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRow {
    /// 1-based position in the server-assigned order.
    pub rank: usize,
    pub name: String,
    pub installs: u64,
    pub source: String,
    pub badge: SkillStatus,
}

/// Project a summary into rows. Pure: no re-sorting, no partial updates;
/// callers always rebuild the whole list from the snapshot.
pub fn project(summary: &Summary) -> Vec<SkillRow> {
    summary
        .skills
        .iter()
        .enumerate()
        .map(|(idx, skill)| SkillRow {
            rank: idx + 1,
            name: skill.name.clone(),
            installs: skill.installs,
            source: skill.top_source.clone(),
            badge: skill.status,
        })
        .collect()
}

pub fn installs_label(installs: u64) -> String {
    format!("{installs} installs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Counts, SkillRecord};
    use pretty_assertions::assert_eq;

    fn record(name: &str, installs: u64, source: &str, status: SkillStatus) -> SkillRecord {
        SkillRecord {
            id: name.to_string(),
            name: name.to_string(),
            installs,
            top_source: source.to_string(),
            status,
        }
    }

    #[test]
    fn row_count_matches_skill_count() {
        let summary = Summary {
            skills: vec![
                record("a", 1, "s1", SkillStatus::Installed),
                record("b", 2, "s2", SkillStatus::Missing),
                record("c", 3, "s3", SkillStatus::Installed),
            ],
            counts: Counts::default(),
        };
        assert_eq!(project(&summary).len(), 3);
    }

    #[test]
    fn rank_is_index_plus_one_in_payload_order() {
        // Deliberately not sorted by installs: the server order wins.
        let summary = Summary {
            skills: vec![
                record("low", 2, "s", SkillStatus::Installed),
                record("high", 900, "s", SkillStatus::Installed),
                record("mid", 40, "s", SkillStatus::Missing),
            ],
            counts: Counts::default(),
        };
        let rows = project(&summary);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].name, "low");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].name, "high");
        assert_eq!(rows[2].rank, 3);
        assert_eq!(rows[2].name, "mid");
    }

    #[test]
    fn row_carries_all_display_fields() {
        let summary = Summary {
            skills: vec![record("a", 5, "x", SkillStatus::Installed)],
            counts: Counts::default(),
        };
        let rows = project(&summary);
        assert_eq!(
            rows[0],
            SkillRow {
                rank: 1,
                name: "a".to_string(),
                installs: 5,
                source: "x".to_string(),
                badge: SkillStatus::Installed,
            }
        );
        assert_eq!(rows[0].badge.label(), "installed");
        assert_eq!(installs_label(rows[0].installs), "5 installs");
    }

    #[test]
    fn empty_summary_projects_to_no_rows() {
        let summary = Summary {
            skills: vec![],
            counts: Counts::default(),
        };
        assert!(project(&summary).is_empty());
    }
}
