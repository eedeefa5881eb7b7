//! # Paraboard Core Library
//!
//! This library provides the logic behind Paraboard, a class-schedule board
//! for a two-week (odd/even) university timetable. The `paraboard-cli`
//! binary is a thin host over the same library.
//!
//! ## Architecture
//!
//! - **Clock**: pure functions resolving "now" into week parity, weekday and
//!   minute of day
//! - **Timetable**: the immutable lesson store, built in or loaded from TOML
//! - **Locator**: active lesson, next lesson and progress for a minute of day
//! - **View**: view models projected from the above plus explicit UI state,
//!   with HTML and plain-text renderers
//! - **Board engine**: a wall-clock driven controller; the caller invokes
//!   `tick()` periodically and applies the returned events
//! - **Animation**: the decorative particle background, independent of the
//!   schedule
//! - **Storage**: TOML configuration and the offline page cache
//!
//! ## Key Components
//!
//! - [`BoardEngine`]: refresh logic for the board
//! - [`Timetable`]: lesson store
//! - [`Animator`]: background frames
//! - [`Config`]: application configuration management

pub mod animation;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod locator;
pub mod storage;
pub mod timetable;
pub mod view;

pub use animation::{Animator, Bounds, Frame, ParticleField};
pub use clock::{ResolvedTime, WeekParity, SEMESTER_START};
pub use dashboard::BoardEngine;
pub use error::{ConfigError, CoreError, TimetableError, ValidationError};
pub use events::Event;
pub use locator::{find_active_lesson, find_next_lesson, progress_percent, NextLesson};
pub use storage::{Config, PageCache};
pub use timetable::{Lesson, LessonTime, Timetable, TimetableIssue};
pub use view::{DashboardView, UiAction, UiState};
