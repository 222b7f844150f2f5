//! Shared helpers for the behavioral tests

use chrono::TimeZone;
use taplog_core::{
    ApprovalService, CommitService, FakeClock, FakeStore, QueryService, SequentialHashGen,
    Submission,
};

pub const SECRET: &str = "barkeeper";

pub struct Harness {
    pub store: FakeStore,
    pub commits: CommitService<FakeStore, SequentialHashGen, FakeClock>,
    pub approvals: ApprovalService<FakeStore>,
    pub queries: QueryService<FakeStore>,
}

/// Harness over an absent backing file (first-write case)
pub fn harness() -> Harness {
    harness_with(FakeStore::new())
}

/// Harness over a seeded backing file
pub fn harness_with(store: FakeStore) -> Harness {
    let clock = FakeClock::at(chrono::Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap());
    Harness {
        commits: CommitService::new(store.clone(), SequentialHashGen::new(), clock),
        approvals: ApprovalService::new(store.clone(), SECRET),
        queries: QueryService::new(store.clone()),
        store,
    }
}

pub fn submission(message: &str, alias: Option<&str>, beer: Option<&str>) -> Submission {
    Submission {
        message: message.to_string(),
        alias: alias.map(str::to_string),
        beer: beer.map(str::to_string),
    }
}
