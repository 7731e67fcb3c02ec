//! Heading anchors compatible with GitHub's Markdown rendering.

/// Characters GitHub drops from heading anchors. Dashes and underscores stay.
const REMOVED_CHARS: &str = "=+!@#$%^&*()|\\'\";:/?.,<>[]{}`~";

/// Format a Markdown heading as the relative link path GitHub gives it.
///
/// Letters are lowercased, leading spaces are removed, the remaining spaces
/// become dashes, special characters are dropped and one `#` is prepended.
/// Emoji are kept as-is even though GitHub removes some of them.
pub fn format_header_path(header: &str) -> String {
    let lowered = header.to_lowercase();

    let mut path = String::with_capacity(lowered.len() + 1);
    path.push('#');
    path.extend(
        lowered
            .trim_start_matches(' ')
            .chars()
            .map(|ch| if ch == ' ' { '-' } else { ch })
            .filter(|ch| !REMOVED_CHARS.contains(*ch)),
    );

    path
}

/// Every header path handed out during one render.
///
/// GitHub numbers repeated headings: the second occurrence gets `-1`, the
/// third `-2` and so on. The cache replays that numbering for links.
#[derive(Debug, Default)]
pub struct HeaderPathCache {
    paths: Vec<String>,
}

impl HeaderPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique path for `header`, recorded so later duplicates get a suffix.
    pub fn unique_header_path(&mut self, header: &str) -> String {
        let path = format_header_path(header);

        let mut unique = path.clone();
        let mut suffix = 1;
        while self.paths.contains(&unique) {
            unique = format!("{}-{}", path, suffix);
            suffix += 1;
        }

        self.paths.push(unique.clone());
        unique
    }

    /// Format a heading as a Markdown link to itself: `[header](#path)`.
    pub fn format_header_link(&mut self, header: &str) -> String {
        let path = self.unique_header_path(header);
        format!("[{}]({})", header, path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
