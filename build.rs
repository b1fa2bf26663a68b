use std::error::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// Fallback describe string when git metadata is unavailable
const UNKNOWN_DESCRIBE: &str = "unknown";

/// Emits VERGEN_GIT_DESCRIBE and the related git variables.
/// # Errors
/// * if `git` is not installed
/// * if the sources were unpacked from an archive without a .git folder
fn emit_git_describe() -> Result<(), Box<dyn Error>> {
    // dirty builds get a suffix, tags are never matched so we always get the short hash
    let gitcl = GitclBuilder::default()
        .describe(false, true, Some("NoTagShouldEverMatchThisPattern"))
        .sha(true)
        .build()?;

    Emitter::default()
        .fail_on_error()
        .add_instructions(&gitcl)?
        .emit()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    if emit_git_describe().is_err() {
        // packagers can provide the describe string themselves
        let describe = option_env!("VCFSIMPLIFY_GIT_DESCRIBE").unwrap_or(UNKNOWN_DESCRIBE);
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={describe}");
    }

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=src");
    Ok(())
}
