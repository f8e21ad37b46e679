// src/store.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// A single job posting held in process memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

impl Job {
    /// Build a job with a fresh server-generated identifier.
    pub fn new(title: &str, company: &str, location: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub email: String,
    pub keyword: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(email: &str, keyword: Option<String>) -> Self {
        Self {
            email: email.to_string(),
            keyword,
            subscribed_at: Utc::now(),
        }
    }
}

/// Append-only in-memory job list. Appends are serialized by the mutex so
/// concurrent create and search requests cannot lose updates; everything is
/// discarded on process exit.
pub struct JobStore {
    jobs: Mutex<Vec<Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }

    pub fn append(&self, job: Job) {
        self.jobs.lock().expect("job store mutex poisoned").push(job);
    }

    /// Snapshot of all stored jobs in insertion order.
    pub fn list(&self) -> Vec<Job> {
        self.jobs.lock().expect("job store mutex poisoned").clone()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SubscriptionStore {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn append(&self, subscription: Subscription) {
        self.subscriptions
            .lock()
            .expect("subscription store mutex poisoned")
            .push(subscription);
    }

    pub fn list(&self) -> Vec<Subscription> {
        self.subscriptions
            .lock()
            .expect("subscription store mutex poisoned")
            .clone()
    }
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}
