// File: tarkovbot-core/src/actions/handles.rs

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::JoinHandle;

/// At most one background task per button context.
///
/// Used for repeating render timers and for in-flight requests: starting a
/// task for a context aborts whatever that context was running before.
///
/// Aborting only takes effect at the task's next `.await`, so each start
/// also hands the task a [`Ticket`]. A task renders through its ticket, and
/// the ticket refuses once the context has been restarted or cancelled.
#[derive(Debug, Default)]
pub struct ContextTasks {
    tasks: DashMap<String, JoinHandle<()>>,
    generations: Arc<DashMap<String, u64>>,
    next_generation: AtomicU64,
}

/// Right to render for one start of one context.
#[derive(Debug, Clone)]
pub struct Ticket {
    context: String,
    generation: u64,
    generations: Arc<DashMap<String, u64>>,
}

impl Ticket {
    /// Run `render` if this ticket is still the newest for its context.
    /// The context's slot stays locked while `render` runs, so a concurrent
    /// restart or cancel cannot slip in between the check and the render.
    pub fn render(&self, render: impl FnOnce()) -> bool {
        match self.generations.get(&self.context) {
            Some(current) if *current == self.generation => {
                render();
                true
            }
            _ => false,
        }
    }
}

impl ContextTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every earlier ticket for `context` and issue a new one.
    fn begin(&self, context: &str) -> Ticket {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.generations.insert(context.to_string(), generation);
        Ticket {
            context: context.to_string(),
            generation,
            generations: self.generations.clone(),
        }
    }

    /// Abort the context's current task (if any), then spawn the task built
    /// by `start`. `start` runs synchronously with the new ticket already in
    /// force, so anything it renders lands after the old task's last render.
    pub fn replace<S, F>(&self, context: &str, start: S)
    where
        S: FnOnce(Ticket) -> F,
        F: Future<Output = ()> + Send + 'static,
    {
        let task = start(self.begin(context));
        match self.tasks.entry(context.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.get().abort();
                entry.insert(tokio::spawn(task));
            }
            Entry::Vacant(entry) => {
                entry.insert(tokio::spawn(task));
            }
        }
    }

    /// Abort the context's task and void its ticket. Returns true if a task
    /// was still running.
    pub fn cancel(&self, context: &str) -> bool {
        self.generations.remove(context);
        match self.tasks.remove(context) {
            Some((_, handle)) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    pub fn is_active(&self, context: &str) -> bool {
        self.tasks
            .get(context)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Number of contexts with a task that has not finished yet.
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|entry| !entry.value().is_finished()).count()
    }
}

impl Drop for ContextTasks {
    fn drop(&mut self) {
        self.generations.clear();
        for entry in self.tasks.iter() {
            entry.value().abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn replace_keeps_one_task_per_context() {
        let tasks = ContextTasks::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            tasks.replace("ctx", |_ticket| async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(tasks.active(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(tasks.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_pending_work() {
        let tasks = ContextTasks::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        tasks.replace("a", |_ticket| async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            h.fetch_add(1, Ordering::SeqCst);
        });
        tasks.replace("b", |_ticket| std::future::pending());

        assert!(tasks.cancel("a"));
        assert!(!tasks.cancel("a"));
        assert!(tasks.is_active("b"));
        assert!(!tasks.is_active("a"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    // A task that already got past its last await when it was aborted still
    // holds its ticket; the ticket must refuse to render.
    #[tokio::test]
    async fn superseded_ticket_cannot_render() {
        let tasks = ContextTasks::new();
        let mut first = None;
        tasks.replace("ctx", |ticket| {
            first = Some(ticket);
            async {}
        });
        let first = first.unwrap();
        assert!(first.render(|| ()));

        let mut second = None;
        tasks.replace("ctx", |ticket| {
            second = Some(ticket);
            async {}
        });
        let second = second.unwrap();

        let mut rendered = Vec::new();
        assert!(!first.render(|| rendered.push("stale")));
        assert!(second.render(|| rendered.push("fresh")));
        assert_eq!(rendered, vec!["fresh"]);

        tasks.cancel("ctx");
        assert!(!second.render(|| rendered.push("after cancel")));
        assert_eq!(rendered, vec!["fresh"]);
    }

    #[tokio::test]
    async fn tickets_are_per_context() {
        let tasks = ContextTasks::new();
        let mut kept = Vec::new();
        for ctx in ["a", "b"] {
            tasks.replace(ctx, |ticket| {
                kept.push(ticket);
                async {}
            });
        }
        tasks.cancel("a");
        assert!(!kept[0].render(|| ()));
        assert!(kept[1].render(|| ()));
    }
}
