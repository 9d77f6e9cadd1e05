//! Mock profile dashboard.
//!
//! The dashboard is static placeholder data until profile storage exists.
//! The only behaviour is ordering deadlines and computing usage shares.

use chrono::NaiveDate;

use crate::models::dashboard::{Dashboard, Deadline, Priority, Team, UsageStat, UserProfile};

/// Build the mock dashboard with deadlines sorted and usage shares filled in.
pub fn mock_dashboard() -> Dashboard {
    let mut deadlines = vec![
        deadline(1, "Q4 Financial Report", Priority::High, (2025, 11, 20), "Complete quarterly analysis"),
        deadline(2, "Client Presentation", Priority::High, (2025, 11, 15), "Prepare slides for stakeholder meeting"),
        deadline(3, "Team Review", Priority::Medium, (2025, 11, 13), "Conduct performance reviews"),
        deadline(4, "Budget Planning", Priority::Low, (2025, 11, 25), "Draft next quarter budget"),
    ];
    sort_deadlines(&mut deadlines);

    Dashboard {
        profile: UserProfile {
            email: "user@example.com".into(),
            company: "Acme Corp".into(),
            role: "Consultant".into(),
            is_premium: true,
        },
        usage: usage_shares(&[("Projects", 45), ("Reports", 30), ("Meetings", 15), ("Tasks", 10)]),
        deadlines,
        teams: vec![
            team(1, "Strategy Team", true, &["Alice Johnson", "Bob Smith", "Carol White"]),
            team(2, "Analytics Team", false, &["David Brown", "Eve Davis", "Frank Miller"]),
            team(3, "Client Relations", false, &["Grace Lee", "Henry Wilson", "Iris Taylor"]),
        ],
    }
}

/// Highest priority first, then earliest due date.
pub fn sort_deadlines(deadlines: &mut [Deadline]) {
    deadlines.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
}

/// Convert raw usage counts into chart slices. An all-zero input yields zero shares.
pub fn usage_shares(stats: &[(&str, u32)]) -> Vec<UsageStat> {
    let total: u32 = stats.iter().map(|(_, v)| v).sum();
    stats
        .iter()
        .map(|(label, value)| UsageStat {
            label: label.to_string(),
            value: *value,
            share: if total == 0 {
                0.0
            } else {
                f64::from(*value) * 100.0 / f64::from(total)
            },
        })
        .collect()
}

fn deadline(id: u32, task: &str, priority: Priority, ymd: (i32, u32, u32), details: &str) -> Deadline {
    Deadline {
        id,
        task: task.into(),
        priority,
        due_date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap_or_default(),
        details: details.into(),
    }
}

fn team(id: u32, name: &str, is_leader: bool, members: &[&str]) -> Team {
    Team {
        id,
        name: name.into(),
        is_leader,
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadlines_sorted_by_priority_then_date() {
        let dash = mock_dashboard();
        let ids: Vec<u32> = dash.deadlines.iter().map(|d| d.id).collect();
        // Both high-priority items first, earlier due date leading.
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn usage_shares_sum_to_hundred() {
        let dash = mock_dashboard();
        let sum: f64 = dash.usage.iter().map(|s| s.share).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(dash.usage[0].share, 45.0);
    }

    #[test]
    fn usage_shares_handle_zero_total() {
        let stats = usage_shares(&[("a", 0), ("b", 0)]);
        assert!(stats.iter().all(|s| s.share == 0.0));
    }

    #[test]
    fn dashboard_serializes_camel_case() {
        let json = serde_json::to_value(mock_dashboard()).expect("serialize");
        assert_eq!(json["profile"]["isPremium"], true);
        assert_eq!(json["deadlines"][0]["dueDate"], "2025-11-15");
        assert_eq!(json["deadlines"][0]["priority"], "high");
        assert_eq!(json["teams"][0]["isLeader"], true);
    }
}
