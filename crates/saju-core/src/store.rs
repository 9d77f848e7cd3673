//! In-memory task store keyed by calendar date.
//!
//! The store owns every [`TaskRecord`] of a session. Records are grouped per
//! date in insertion order; a record's id encodes its date and its position
//! within that date's list, so ids are stable for as long as the session
//! lives (records are never removed).
//!
//! None of the operations fail: unknown dates read as empty lists and unknown
//! ids toggle to `false` without touching any state.

use std::collections::{BTreeMap, HashMap};

use jiff::{Timestamp, civil::Date};
use log::debug;

use crate::models::{NewTask, Stats, TaskRecord};

/// Date-keyed task collection with a monotonic completion counter.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: BTreeMap<Date, Vec<TaskRecord>>,
    index: HashMap<String, (Date, usize)>,
    streak: u32,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the id of the `sequence`-th task on `date`.
    pub fn task_id(date: Date, sequence: usize) -> String {
        format!("{date}_{sequence}")
    }

    /// Appends a task to the list for `date` and returns its id.
    pub fn add_task(&mut self, date: Date, task: NewTask) -> String {
        let list = self.tasks.entry(date).or_default();
        let sequence = list.len();
        let id = Self::task_id(date, sequence);

        list.push(TaskRecord {
            id: id.clone(),
            date,
            title: task.title,
            description: task.description,
            completed: false,
            created_at: Timestamp::now(),
        });
        self.index.insert(id.clone(), (date, sequence));

        debug!("Added task {id}");
        id
    }

    /// Tasks scheduled on `date`, in insertion order.
    pub fn get_tasks(&self, date: Date) -> &[TaskRecord] {
        self.tasks.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Looks up a single task.
    pub fn task(&self, task_id: &str) -> Option<&TaskRecord> {
        let (date, sequence) = self.index.get(task_id)?;
        self.tasks.get(date)?.get(*sequence)
    }

    /// Whether the task is currently complete; unknown ids are incomplete.
    pub fn is_completed(&self, task_id: &str) -> bool {
        self.task(task_id).is_some_and(|task| task.completed)
    }

    /// Flips the completion flag of `task_id` and returns the new state.
    ///
    /// Every incomplete-to-complete transition bumps the streak counter by
    /// one. Completing, un-completing and completing again counts twice; the
    /// counter is never decremented. Unknown ids return `false`.
    pub fn toggle_completion(&mut self, task_id: &str) -> bool {
        let Some(task) = self
            .index
            .get(task_id)
            .and_then(|(date, sequence)| self.tasks.get_mut(date)?.get_mut(*sequence))
        else {
            debug!("Ignoring toggle of unknown task {task_id}");
            return false;
        };

        task.completed = !task.completed;
        if task.completed {
            self.streak += 1;
        }
        task.completed
    }

    /// Aggregate statistics. `ongoing_roadmaps` is the number of roadmap
    /// items the caller tracks beside the store.
    pub fn get_stats(&self, ongoing_roadmaps: usize) -> Stats {
        Stats {
            total_tasks: self.len(),
            completed_tasks: self.tasks.values().flatten().filter(|t| t.completed).count(),
            ongoing_roadmaps,
            streak_days: self.streak,
        }
    }

    /// Current value of the completion counter.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Day numbers of the given month that have at least one task.
    pub fn dates_with_tasks(&self, year: i16, month: i8) -> Vec<i8> {
        self.tasks
            .iter()
            .filter(|(date, list)| date.year() == year && date.month() == month && !list.is_empty())
            .map(|(date, _)| date.day())
            .collect()
    }

    /// Iterates over every task, ordered by date then insertion.
    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.values().flatten()
    }

    /// Total number of tasks across all dates.
    pub fn len(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn task(title: &str) -> NewTask {
        NewTask::new(title, format!("{title} details"))
    }

    #[test]
    fn test_add_and_get_task() {
        let mut store = TaskStore::new();
        let day = date(2025, 6, 1);

        let id = store.add_task(day, task("Meditate"));
        let tasks = store.get_tasks(day);

        assert_eq!(id, "2025-06-01_0");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].title, "Meditate");
        assert_eq!(tasks[0].date, day);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn test_ids_are_sequential_per_date() {
        let mut store = TaskStore::new();
        let first = store.add_task(date(2025, 6, 1), task("a"));
        let second = store.add_task(date(2025, 6, 1), task("b"));
        let other = store.add_task(date(2025, 6, 2), task("c"));

        assert_eq!(first, "2025-06-01_0");
        assert_eq!(second, "2025-06-01_1");
        assert_eq!(other, "2025-06-02_0");
        assert_eq!(store.task(&second).map(|t| t.title.as_str()), Some("b"));
    }

    #[test]
    fn test_unknown_date_is_empty() {
        let store = TaskStore::new();
        assert!(store.get_tasks(date(2030, 1, 1)).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_counts_only_completions() {
        let mut store = TaskStore::new();
        let id = store.add_task(date(2025, 6, 1), task("Walk"));

        assert!(store.toggle_completion(&id));
        assert_eq!(store.get_stats(0).streak_days, 1);
        assert!(store.is_completed(&id));

        assert!(!store.toggle_completion(&id));
        assert_eq!(store.get_stats(0).streak_days, 1);
        assert!(!store.is_completed(&id));

        assert!(store.toggle_completion(&id));
        assert_eq!(store.streak(), 2);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add_task(date(2025, 6, 1), task("Walk"));

        assert!(!store.toggle_completion("2025-06-01_7"));
        assert!(!store.toggle_completion("nonsense"));
        let stats = store.get_stats(0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.total_tasks, 1);
    }

    #[test]
    fn test_stats_across_dates() {
        let mut store = TaskStore::new();
        let mut ids = Vec::new();
        for (day, title) in [(1, "a"), (1, "b"), (1, "c"), (2, "d"), (2, "e")] {
            ids.push(store.add_task(date(2025, 6, day), task(title)));
        }

        store.toggle_completion(&ids[0]);
        store.toggle_completion(&ids[4]);

        let stats = store.get_stats(3);
        assert_eq!(stats.total_tasks, 5);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.ongoing_roadmaps, 3);
        assert_eq!(stats.streak_days, 2);
    }

    #[test]
    fn test_dates_with_tasks_filters_month() {
        let mut store = TaskStore::new();
        store.add_task(date(2025, 6, 3), task("a"));
        store.add_task(date(2025, 6, 17), task("b"));
        store.add_task(date(2025, 7, 1), task("c"));
        store.add_task(date(2024, 6, 3), task("d"));

        assert_eq!(store.dates_with_tasks(2025, 6), vec![3, 17]);
        assert_eq!(store.dates_with_tasks(2025, 8), Vec::<i8>::new());
    }

    #[test]
    fn test_iter_is_ordered_by_date() {
        let mut store = TaskStore::new();
        store.add_task(date(2025, 6, 5), task("later"));
        store.add_task(date(2025, 6, 1), task("earlier"));

        let titles: Vec<&str> = store.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["earlier", "later"]);
        assert_eq!(store.len(), 2);
    }
}
