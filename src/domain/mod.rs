//! Domain logic: derangement assignment and the event lifecycle

mod assignment;
mod states;
mod transitions;


pub use assignment::{assign, assign_with_rng, is_derangement, MAX_ASSIGNMENT_ATTEMPTS};
pub use states::{get_allowed_transitions, Transition};
pub use transitions::{
    apply_cancel, apply_create, apply_join, apply_leave, apply_start, apply_status, StartPolicy,
};
