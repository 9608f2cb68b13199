//! Ordered, commented `KEY=value` environment file.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSection {
    pub title: String,
    pub entries: Vec<EnvEntry>,
}

impl EnvSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(EnvEntry {
            key: key.into(),
            value: value.into(),
            comment: None,
        });
        self
    }

    pub fn commented(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.entries.push(EnvEntry {
            key: key.into(),
            value: value.into(),
            comment: Some(comment.into()),
        });
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

/// Sections render in insertion order; keys render in insertion order within
/// a section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    sections: Vec<EnvSection>,
}

impl EnvFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: EnvSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[EnvSection] {
        &self.sections
    }

    pub fn section(&self, title: &str) -> Option<&EnvSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| &s.entries)
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(|s| s.keys())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("# ── {} ──\n", section.title));
            for entry in &section.entries {
                if let Some(comment) = &entry.comment {
                    out.push_str(&format!("# {comment}\n"));
                }
                out.push_str(&format!("{}={}\n", entry.key, entry.value));
            }
        }
        out
    }
}
