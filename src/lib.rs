//! famgraph: family tree graphs with union nodes and layered layout
//!
//! Layers, innermost first:
//! - [`domain`]: entities, graph builder, validator, filters, geometry (pure)
//! - [`infrastructure`]: layout engine boundary, layered engine, data sources, DI
//! - [`application`]: layout adapter and orchestrator
//! - [`cli`]: diagnostic command line driver

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
