/*!
    Filesystem checks run before any decoding starts.
*/

use std::fs;
use std::io;
use std::path::Path;

use stereo_types::{Error, Result};

/**
    Fail with `NotFound` unless `path` names an existing regular file.
*/
pub fn check_input(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("input is not a file: {}", path.display()),
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        ))),
        Err(e) => Err(Error::Io(e)),
    }
}

/**
    Create the directory that will hold `output` (with any missing parents)
    and make sure a file can be created in it.
*/
pub fn prepare_output_dir(output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| {
        Error::Io(io::Error::new(
            e.kind(),
            format!("failed to create output directory {}: {e}", dir.display()),
        ))
    })?;

    // Removed again when the handle drops.
    tempfile::Builder::new()
        .prefix(".stereoconv-")
        .tempfile_in(dir)
        .map(drop)
        .map_err(|e| {
            Error::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("output directory is not writable: {} ({e})", dir.display()),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_kind(err: Error) -> io::ErrorKind {
        match err {
            Error::Io(e) => e.kind(),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input(&dir.path().join("missing.mp4")).unwrap_err();
        assert_eq!(io_kind(err), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_is_not_an_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input(dir.path()).unwrap_err();
        assert_eq!(io_kind(err), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn existing_input_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie.mp4");
        fs::write(&path, b"not really a movie").unwrap();
        check_input(&path).unwrap();
    }

    #[test]
    fn output_parents_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("a/b/c/movie_tab.mp4");

        prepare_output_dir(&output).unwrap();

        assert!(dir.path().join("a/b/c").is_dir());
        assert!(!output.exists());
        // The write probe cleans up after itself.
        assert_eq!(fs::read_dir(dir.path().join("a/b/c")).unwrap().count(), 0);
    }

    #[test]
    fn bare_file_name_uses_current_directory() {
        // Only checks that an empty parent is not passed to create_dir_all.
        let result = prepare_output_dir(Path::new("movie_tab.mp4"));
        if let Err(err) = result {
            assert_eq!(io_kind(err), io::ErrorKind::PermissionDenied);
        }
    }
}
