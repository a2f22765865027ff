//! Loading a corpus from a directory tree of text files.

use super::{Corpus, CorpusBuilder};
use crate::error::{CompletionError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};
use walkdir::WalkDir;

/// Extension of the files that are indexed.
pub const TEXT_EXTENSION: &str = "txt";

/// Loads every `.txt` file below a root directory as one document.
///
/// Directories are walked depth-first with entries visited in file-name
/// order, so document ids are stable across runs. Each line of a file is a
/// candidate sentence.
///
/// # Example
///
/// ```rust,ignore
/// use phrase_complete::corpus::CorpusLoader;
///
/// let corpus = CorpusLoader::new("data/archive")
///     .document_offset(100)
///     .load()?;
/// ```
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    root: PathBuf,
    document_offset: usize,
}

impl CorpusLoader {
    /// Create a loader for the given root directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        CorpusLoader {
            root: root.as_ref().to_path_buf(),
            document_offset: 0,
        }
    }

    /// Id assigned to the first non-empty document (default 0).
    pub fn document_offset(mut self, offset: usize) -> Self {
        self.document_offset = offset;
        self
    }

    /// The root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and build a corpus.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::NotADirectory`] if the root is not a
    /// directory and [`CompletionError::Io`] if an entry or file cannot be
    /// read. Files that are not valid UTF-8 are decoded lossily.
    pub fn load(&self) -> Result<Corpus> {
        let mut builder = CorpusBuilder::with_document_offset(self.document_offset);
        let files = self.load_into(&mut builder)?;
        let corpus = builder.build();

        let stats = corpus.stats();
        info!(
            root = %self.root.display(),
            files,
            documents = stats.documents,
            sentences = stats.sentences,
            words = stats.words,
            distinct_words = stats.distinct_words,
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Feed every text file below the root into an existing builder.
    ///
    /// Returns the number of files read, including files that turned out to
    /// hold no sentences.
    pub fn load_into(&self, builder: &mut CorpusBuilder) -> Result<usize> {
        if !self.root.is_dir() {
            return Err(CompletionError::NotADirectory(self.root.clone()));
        }

        let mut files = 0;
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| CompletionError::Io {
                path: err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: err.into(),
            })?;

            let path = entry.path();
            if !is_text_file(path) {
                continue;
            }

            let text = read_text(path)?;
            let document_id = builder.add_document(text.lines())?;
            trace!(path = %path.display(), ?document_id, "loaded file");
            files += 1;
        }
        Ok(files)
    }
}

fn is_text_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == TEXT_EXTENSION)
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| CompletionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}
