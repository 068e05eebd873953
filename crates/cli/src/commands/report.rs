use anyhow::{Result, bail};
use liberty_dev_core::ReportKind;
use std::path::PathBuf;

use crate::workspace::{open_registry, resolve_project};

pub fn report_command(workspaces: &[PathBuf], project: &str, kind: ReportKind) -> Result<()> {
    let registry = open_registry(workspaces)?;
    let entity = resolve_project(&registry, project)?;

    if entity.project_type().build_tool() != kind.build_tool() {
        bail!("{} has no {kind} report", entity.label);
    }

    let report = kind.resolve(entity.path(), registry.roots());
    if report.is_file() {
        println!("📊 {}", kind.title(&entity.label));
        println!("   {}", report.display());
    } else {
        println!(
            "❌ Test report not found at {}. Run the tests first.",
            report.display()
        );
    }
    Ok(())
}
