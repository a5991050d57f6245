//! A module that fails while registering

use fdt_runtime::{Registry, TestFn};

pub fn register(t: &Registry) -> anyhow::Result<()> {
    t.test(("registers fine", TestFn::new(|| Ok(()))))?;
    t.test(("", TestFn::new(|| Ok(()))))?;
    Ok(())
}
