use crate::error::{ChromemarkError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

/// Where the generated document goes: a file or standard output.
///
/// Dropping the sink closes it; [`OutputSink::finish`] additionally reports
/// flush and sync failures.
pub struct OutputSink {
    target: Target,
}

enum Target {
    Stdout(BufWriter<Stdout>),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl OutputSink {
    /// Create (or truncate) `path`, or use stdout when there is none
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let target = match path {
            None => Target::Stdout(BufWriter::new(io::stdout())),
            Some(path) => {
                let file = File::create(path).map_err(|e| ChromemarkError::io(path, e))?;
                Target::File {
                    path: path.to_path_buf(),
                    writer: BufWriter::new(file),
                }
            }
        };
        Ok(Self { target })
    }

    #[cfg(test)]
    pub fn is_stdout(&self) -> bool {
        matches!(self.target, Target::Stdout(_))
    }

    /// Flush everything and, for files, sync to disk
    pub fn finish(self) -> Result<()> {
        match self.target {
            Target::Stdout(mut writer) => writer.flush()?,
            Target::File { path, writer } => {
                let file = writer
                    .into_inner()
                    .map_err(|e| ChromemarkError::io(&path, e.into_error()))?;
                file.sync_all().map_err(|e| ChromemarkError::io(&path, e))?;
            }
        }
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.target {
            Target::Stdout(w) => w.write(buf),
            Target::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.target {
            Target::Stdout(w) => w.flush(),
            Target::File { writer, .. } => writer.flush(),
        }
    }
}
