//! Derivations over the task list: list filtering, ordering and the
//! calendar grouping. All of it is computed on demand from the current
//! list and never stored.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{SortKey, Task};

/// List-view partition. A task belongs to exactly one bucket: archived
/// wins over everything, so a completed-and-archived task shows up only
/// under `Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Active,
    Completed,
    Archived,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::Active => !task.completed && !task.archived,
            Filter::Completed => task.completed && !task.archived,
            Filter::Archived => task.archived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub active: usize,
    pub completed: usize,
    pub archived: usize,
}

pub fn filter_counts(tasks: &[Task]) -> FilterCounts {
    FilterCounts {
        active: tasks.iter().filter(|t| Filter::Active.matches(t)).count(),
        completed: tasks.iter().filter(|t| Filter::Completed.matches(t)).count(),
        archived: tasks.iter().filter(|t| Filter::Archived.matches(t)).count(),
    }
}

pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

fn sort_timestamp(task: &Task, key: SortKey) -> DateTime<Utc> {
    match key {
        SortKey::UpdatedAt => task.updated_at,
        SortKey::CreatedAt => task.created_at,
    }
}

/// Pinned rows strictly before unpinned ones, ties broken by the selected
/// timestamp, newest first. Matches the order the backend query produces.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    tasks.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| sort_timestamp(b, key).cmp(&sort_timestamp(a, key)))
    });
}

/// Header progress numbers: everything not archived counts as the total,
/// completed-but-not-archived as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    pub fn percent(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn progress(tasks: &[Task]) -> Progress {
    Progress {
        total: tasks.iter().filter(|t| !t.archived).count(),
        completed: tasks.iter().filter(|t| t.completed && !t.archived).count(),
    }
}

/// Calendar bucket key. Variant order gives the map order: dated groups
/// chronologically, the no-due-date group after all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DueGroup {
    Due(NaiveDate),
    NoDueDate,
}

/// Groups tasks by the day they are due. Archived tasks never appear in
/// the calendar, whatever their other flags say.
pub fn calendar_groups(tasks: &[Task]) -> BTreeMap<DueGroup, Vec<&Task>> {
    let mut groups: BTreeMap<DueGroup, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if task.archived {
            continue;
        }
        let key = match task.due_date {
            Some(date) => DueGroup::Due(date),
            None => DueGroup::NoDueDate,
        };
        groups.entry(key).or_default().push(task);
    }
    groups
}

/// Card status within a dated calendar group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Completed,
    Upcoming,
}

pub fn due_status(task: &Task, today: NaiveDate) -> DueStatus {
    match task.due_date {
        Some(date) if date < today && !task.completed => DueStatus::Overdue,
        _ if task.completed => DueStatus::Completed,
        _ => DueStatus::Upcoming,
    }
}

/// Heading text for a calendar group, relative to `today`. Every date
/// more than a day in the past collapses into one "Past Due" label; far
/// dates carry the year.
pub fn group_label(group: DueGroup, today: NaiveDate) -> String {
    let date = match group {
        DueGroup::NoDueDate => return "No Due Date".to_string(),
        DueGroup::Due(date) => date,
    };

    let diff_days = (date - today).num_days();
    match diff_days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < -1 => "Past Due".to_string(),
        d if d > 365 => date.format("%a, %b %-d, %Y").to_string(),
        _ => date.format("%a, %b %-d").to_string(),
    }
}
