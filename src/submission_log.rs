use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use tokio::fs;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::Rsvp;

/// Flat file with one human-readable line per attending guest, e.g.
///
/// ```text
/// Ann a@b.com 555 created_at: 19 Oct 26 10:04 UTC
/// ```
///
/// Lines are separated (not terminated) by `\n`.
pub struct SubmissionLog {
    path: PathBuf,
    // appends from different workers must not interleave, and the
    // "is the file empty?" check must see the previous write
    write_lock: Mutex<()>,
}

/// `{name} {email} {phone} created_at: {rfc822}`
pub fn format_line(
    rsvp: &Rsvp,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{} {} {} created_at: {}",
        rsvp.name,
        rsvp.email,
        rsvp.phone,
        // RFC 822 with a two-digit year, e.g. `02 Jan 06 15:04 UTC`
        at.format("%d %b %y %H:%M %Z"),
    )
}

impl SubmissionLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Append a line for `rsvp`, creating the file (and its parent dir) if
    /// absent.
    #[tracing::instrument(
        name = "Appending to submission log",
        skip(self, rsvp),
        fields(path = %self.path.display())
    )]
    pub async fn append(
        &self,
        rsvp: &Rsvp,
    ) -> Result<(), std::io::Error> {
        self.append_at(rsvp, Utc::now()).await
    }

    pub async fn append_at(
        &self,
        rsvp: &Rsvp,
        at: DateTime<Utc>,
    ) -> Result<(), std::io::Error> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let line = format_line(rsvp, at);
        let line = match file.metadata().await?.len() {
            0 => line,
            _ => format!("\n{line}"),
        };
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
