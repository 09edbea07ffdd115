use crate::errors::AppError;
use crate::result::AppResult;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Lines of a mailbox archive. Bytes that are not valid UTF-8 are replaced
/// rather than rejected.
pub struct ArchiveLines<R> {
    path: PathBuf,
    reader: R,
    buffer: Vec<u8>,
}


pub fn open(path: &Path) -> AppResult<ArchiveLines<BufReader<File>>> {
    let file = File::open(path).map_err(|source| AppError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ArchiveLines::new(path, BufReader::new(file)))
}


impl<R: BufRead> ArchiveLines<R> {
    pub fn new(path: &Path, reader: R) -> Self {
        Self {
            path: path.to_path_buf(),
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for ArchiveLines<R> {
    type Item = AppResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();

        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned())),
            Err(source) => Some(Err(AppError::InputUnavailable {
                path: self.path.clone(),
                source,
            })),
        }
    }
}
