//! Career profile data structures and allocation invariants

mod data;

pub use data::{
    AllocationSplit, CareerLevel, CareerProfile, HistoryEntry, ProfileError, TargetAllocation,
    TaxTreatment, DEFAULT_ANNUAL_RETURN, DEFAULT_START_AGE, DEFAULT_TAX_DRAG,
};
