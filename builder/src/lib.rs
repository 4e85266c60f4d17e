use std::path::PathBuf;

mod assets;
mod builder;
mod config;
mod css;
mod fragments;
mod pages;
mod targets;

pub mod env;

pub use targets::{Fragment, FragmentKind, NameProblem, PageTarget, TargetError, generate};

pub fn build(
    src_dir: impl Into<PathBuf>,
    dst_dir: impl Into<PathBuf>,
    mode: env::Mode,
) -> anyhow::Result<()> {
    let builder = builder::Builder::new(src_dir, dst_dir, mode)?;
    builder.build()?;
    Ok(())
}
