//! Core building blocks shared by every model

pub mod calendar;
