//! `roster template`

use anyhow::Result;
use colored::*;

use super::TemplateArgs;
use crate::ingest::write_template;
use crate::records::RecordSchema;

pub fn handle_template_command(args: TemplateArgs) -> Result<()> {
    let schema = RecordSchema::users();
    write_template(&schema, &args.path)?;

    println!(
        "Template with headers {} written to {}",
        schema.describe(),
        args.path.display().to_string().bright_green()
    );
    Ok(())
}
