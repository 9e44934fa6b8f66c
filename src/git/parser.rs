use crate::git::types::RepositoryStatus;

/// Report section currently being consumed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Section {
    None,
    Staged,
    Unstaged,
    Untracked,
}

/// Line-oriented state machine over the human-readable `git status` report.
///
/// Output arrives as raw byte chunks that may be split anywhere, including
/// mid-line; incomplete fragments are carried over to the next chunk so the
/// same input parses identically regardless of chunking. Both `\n` and
/// `\r\n` line endings are accepted.
pub struct StatusParser {
    status: RepositoryStatus,
    carry: Vec<u8>,
    section: Section,
    tracking_empty_lines: bool,
    pending_section_close: bool,
    expect_diverged_counts: bool,
}

impl StatusParser {
    pub fn new() -> Self {
        Self {
            status: RepositoryStatus::default(),
            carry: Vec::new(),
            section: Section::None,
            tracking_empty_lines: false,
            pending_section_close: false,
            expect_diverged_counts: false,
        }
    }

    /// Feed one chunk of raw subprocess output.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.carry.extend_from_slice(chunk);
        while let Some(pos) = self.carry.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.carry.drain(..=pos).collect();
            let mut line = &line[..line.len() - 1];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            let text = String::from_utf8_lossy(line);
            self.process_line(text.trim());
        }
    }

    /// Flush any buffered final fragment and hand out the finished record.
    pub fn finish(mut self) -> RepositoryStatus {
        if !self.carry.is_empty() {
            let carry = std::mem::take(&mut self.carry);
            let text = String::from_utf8_lossy(&carry);
            self.process_line(text.trim());
        }
        self.status
    }

    /// Classify one trimmed line. First match wins; the order here is
    /// load-bearing, since headers, tracking lines, and section content are
    /// mutually exclusive in the report format.
    fn process_line(&mut self, text: &str) {
        // Blank lines while a section is open: the first one separates the
        // header from its entries, the second one closes the section. A
        // non-blank line in between does not reset the close.
        if self.tracking_empty_lines && text.is_empty() {
            if self.pending_section_close {
                self.section = Section::None;
                self.tracking_empty_lines = false;
                self.pending_section_close = false;
            } else {
                self.pending_section_close = true;
            }
            return;
        }

        if let Some(name) = text.strip_prefix("On branch ") {
            self.status.local_branch_name = name.to_string();
            return;
        }

        if text.starts_with("Your branch") {
            if text.contains("ahead") {
                self.status.local_new_commits = number_after(text, "by ").unwrap_or(0);
            } else if text.contains("behind") {
                self.status.remote_new_commits = number_after(text, "by ").unwrap_or(0);
            } else if text.contains("diverged") {
                // No counts on this line; the next content line carries both.
                self.expect_diverged_counts = true;
            }
            if let Some(remote) = quoted_token(text) {
                self.status.remote_branch_name = remote.to_string();
            }
            return;
        }

        if self.expect_diverged_counts && !text.is_empty() {
            self.status.local_new_commits = number_after(text, "have ").unwrap_or(0);
            self.status.remote_new_commits = number_after(text, "and ").unwrap_or(0);
            self.expect_diverged_counts = false;
            return;
        }

        match text {
            "Changes to be committed:" => {
                self.open_section(Section::Staged);
                return;
            }
            "Changes not staged for commit:" => {
                self.open_section(Section::Unstaged);
                return;
            }
            "Untracked files:" => {
                self.open_section(Section::Untracked);
                return;
            }
            _ => {}
        }

        // Section entries only count once the separator blank after the
        // header has been seen.
        if self.pending_section_close {
            match self.section {
                Section::Staged => {
                    if text.contains("new file:") {
                        self.status.staged_changes.added += 1;
                    } else if text.contains("modified:") {
                        self.status.staged_changes.modified += 1;
                    } else if text.contains("deleted:") {
                        self.status.staged_changes.deleted += 1;
                    }
                }
                Section::Unstaged => {
                    if text.contains("modified:") {
                        self.status.unstaged_changes.modified += 1;
                    } else if text.contains("deleted:") {
                        self.status.unstaged_changes.deleted += 1;
                    }
                }
                Section::Untracked => {
                    // Untracked files count as additions to the unstaged set.
                    self.status.unstaged_changes.added += 1;
                }
                Section::None => {}
            }
        }
    }

    fn open_section(&mut self, section: Section) {
        self.section = section;
        self.tracking_empty_lines = true;
        self.pending_section_close = false;
    }
}

/// First integer following `marker`, skipping occurrences of `marker` that
/// are not followed by a digit ("and have 2 and 5 ..." must yield 5 for
/// marker "and ", not fail on the leading "and have").
fn number_after(text: &str, marker: &str) -> Option<u32> {
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        rest = &rest[idx + marker.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end > 0 {
            return rest[..end].parse().ok();
        }
    }
    None
}

/// The first single-quoted token on the line, e.g. the upstream name in
/// "Your branch is ahead of 'origin/main' by 3 commits."
fn quoted_token(text: &str) -> Option<&str> {
    let start = text.find('\'')? + 1;
    let end = start + text[start..].find('\'')?;
    Some(&text[start..end])
}
