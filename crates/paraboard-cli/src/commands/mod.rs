pub mod animate;
pub mod board;
pub mod config;
pub mod timetable;
pub mod watch;
