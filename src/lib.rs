//! Core library for the qc-report command line application.
//!
//! The library turns a multi-tab Input workbook and an Analysis workbook into
//! a single consolidated Master sheet with tier verdicts. Workbook adapters
//! live under [`qc::report::io`], the table representation inside
//! [`qc::report::model`], the pipeline stages in [`qc::report::collate`],
//! [`qc::report::merge`], [`qc::report::flags`] and [`qc::report::summary`],
//! and the orchestration under [`qc::report::pipeline`].

pub mod qc;

pub use qc::report::{
    ReportError, Result, collate, error, flags, io, merge, model, normalize, pipeline, progress,
    summary, tiers,
};
