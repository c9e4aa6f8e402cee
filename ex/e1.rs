use std::error::Error;
use std::fs;
use scoped_tempdir::ScopedTempDir;

fn main() -> Result<(), Box<dyn Error>> {
    // Create a uniquely named directory in the system's temp directory.
    let mut scratch = ScopedTempDir::create("e1-*.work")?;
    let path = scratch.path().map(ToOwned::to_owned).unwrap_or_default();
    println!("Working in {}", path.display());

    // Fill it with something worth cleaning up.
    fs::write(path.join("notes.txt"), "Hello, scoped directory!")?;

    // Let a guard close a second directory when this block ends.
    {
        let mut inner = ScopedTempDir::create_in(&path, "inner")?;
        let guard = inner.guard();
        println!("Inner directory: {:?}", guard.path());
    }

    // Nothing is removed on drop; close explicitly. A second close does nothing.
    scratch.close()?;
    scratch.close()?;
    println!("Removed: {}", !path.exists());

    Ok(())
}
