//! Reminder and notification dispatch.
//!
//! The core decides what should fire and when; a `ReminderDispatcher` is
//! handed the result. `BroadcastDispatcher` publishes each call as a JSON
//! event on a broadcast channel that `/ws` clients subscribe to. Actual
//! platform delivery happens on the client side.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::wellness::hydration::HydrationSummary;
use crate::wellness::reminders::ReminderPlan;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchEvent {
    RemindersCancelled,
    RecurringReminder {
        first_fire: NaiveDateTime,
        interval_minutes: i32,
    },
    OneShotReminder {
        at: NaiveDateTime,
    },
    GoalReached {
        summary: HydrationSummary,
    },
    HabitProgressChanged {
        habit_id: uuid::Uuid,
        date: String,
    },
}

#[async_trait]
pub trait ReminderDispatcher: Send + Sync {
    async fn register_recurring(&self, interval_minutes: i32, first_fire: NaiveDateTime);
    async fn register_one_shot(&self, at: NaiveDateTime);
    async fn cancel_reminders(&self);
    async fn notify_goal_reached(&self, summary: &HydrationSummary);
    async fn notify_progress_changed(&self, habit_id: uuid::Uuid, date: &str);
}

/// Replace whatever was registered before with `plan`.
pub async fn apply_plan(dispatcher: &dyn ReminderDispatcher, plan: &ReminderPlan) {
    dispatcher.cancel_reminders().await;
    match plan {
        ReminderPlan::Disabled => {}
        ReminderPlan::Recurring {
            first_fire,
            interval_minutes,
        } => dispatcher.register_recurring(*interval_minutes, *first_fire).await,
        ReminderPlan::OneShots(times) => {
            for at in times {
                dispatcher.register_one_shot(*at).await;
            }
        }
    }
}

#[derive(Clone)]
pub struct BroadcastDispatcher {
    tx: broadcast::Sender<String>,
}

impl BroadcastDispatcher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn sender(&self) -> broadcast::Sender<String> {
        self.tx.clone()
    }

    fn publish(&self, event: DispatchEvent) {
        let msg = match serde_json::to_string(&event) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode dispatch event");
                return;
            }
        };
        // No subscribers is fine; the event is simply dropped.
        let receivers = self.tx.send(msg).unwrap_or(0);
        tracing::debug!(?event, receivers, "Dispatched event");
    }
}

#[async_trait]
impl ReminderDispatcher for BroadcastDispatcher {
    async fn register_recurring(&self, interval_minutes: i32, first_fire: NaiveDateTime) {
        tracing::info!(%first_fire, interval_minutes, "Registering recurring hydration reminder");
        self.publish(DispatchEvent::RecurringReminder {
            first_fire,
            interval_minutes,
        });
    }

    async fn register_one_shot(&self, at: NaiveDateTime) {
        tracing::info!(%at, "Registering hydration reminder");
        self.publish(DispatchEvent::OneShotReminder { at });
    }

    async fn cancel_reminders(&self) {
        tracing::info!("Cancelling hydration reminders");
        self.publish(DispatchEvent::RemindersCancelled);
    }

    async fn notify_goal_reached(&self, summary: &HydrationSummary) {
        tracing::info!(date = %summary.date, total_ml = summary.total_ml, "Hydration goal reached");
        self.publish(DispatchEvent::GoalReached {
            summary: summary.clone(),
        });
    }

    async fn notify_progress_changed(&self, habit_id: uuid::Uuid, date: &str) {
        self.publish(DispatchEvent::HabitProgressChanged {
            habit_id,
            date: date.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn drain(rx: &mut broadcast::Receiver<String>) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(serde_json::from_str(&msg).unwrap());
        }
        out
    }

    #[tokio::test]
    async fn recurring_plan_cancels_then_registers() {
        let dispatcher = BroadcastDispatcher::new(16);
        let mut rx = dispatcher.subscribe();

        let plan = ReminderPlan::Recurring {
            first_fire: at("2024-01-01 10:00"),
            interval_minutes: 120,
        };
        apply_plan(&dispatcher, &plan).await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["type"], "reminders_cancelled");
        assert_eq!(events[1]["type"], "recurring_reminder");
        assert_eq!(events[1]["interval_minutes"], 120);
        assert_eq!(events[1]["first_fire"], "2024-01-01T10:00:00");
    }

    #[tokio::test]
    async fn one_shot_plan_registers_each_time() {
        let dispatcher = BroadcastDispatcher::new(16);
        let mut rx = dispatcher.subscribe();

        let plan = ReminderPlan::OneShots(vec![at("2024-01-01 16:00"), at("2024-01-01 18:00")]);
        apply_plan(&dispatcher, &plan).await;

        let kinds: Vec<_> = drain(&mut rx)
            .into_iter()
            .map(|e| e["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["reminders_cancelled", "one_shot_reminder", "one_shot_reminder"]);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_harmless() {
        let dispatcher = BroadcastDispatcher::new(4);
        apply_plan(&dispatcher, &ReminderPlan::Disabled).await;
    }
}
