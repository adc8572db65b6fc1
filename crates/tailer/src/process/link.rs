use std::collections::HashMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

const CORE_REPOSITORY: &str = "https://github.com/WordPress/wordpress/blob";

// Path separators stay readable in query values
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'&')
    .add(b'=')
    .add(b'+');

/// Which part of the installation a source file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Plugin,
    Theme,
    MuPlugin,
    Core,
    Unknown,
}

/// Resolves a source file reported in the log to a link a user can follow.
pub trait EditorLinks: Send + Sync {
    fn file_kind(&self, path: &str) -> FileKind;

    fn link(&self, path: &str, line: u32) -> Option<String>;
}

/// Editor and source-repository links for a WordPress installation.
#[derive(Debug, Clone)]
pub struct WordPressLinks {
    abspath: String,
    content_dir: String,
    admin_url: String,
    version: String,
    disallow_file_edit: bool,
    plugins: HashMap<String, String>,
}

impl WordPressLinks {
    pub fn new(site: &SiteConfig) -> Self {
        let mut admin_url = site.admin_url.clone();
        if !admin_url.ends_with('/') {
            admin_url.push('/');
        }

        Self {
            abspath: site.abspath(),
            content_dir: site.content_dir(),
            admin_url,
            version: site.version.clone(),
            disallow_file_edit: site.disallow_file_edit,
            plugins: site.plugins.clone(),
        }
    }

    fn under<'p>(&self, path: &'p str, dir: &str) -> Option<&'p str> {
        path.strip_prefix(&self.content_dir)?
            .strip_prefix('/')?
            .strip_prefix(dir)?
            .strip_prefix('/')
    }

    fn editor_url(&self, page: &str, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}?{}", self.admin_url, page, query)
    }
}

impl EditorLinks for WordPressLinks {
    fn file_kind(&self, path: &str) -> FileKind {
        if self.under(path, "plugins").is_some() {
            FileKind::Plugin
        } else if self.under(path, "themes").is_some() {
            FileKind::Theme
        } else if self.under(path, "mu-plugins").is_some() {
            FileKind::MuPlugin
        } else if path.starts_with(&self.abspath) {
            FileKind::Core
        } else {
            FileKind::Unknown
        }
    }

    fn link(&self, path: &str, line: u32) -> Option<String> {
        let line = line.to_string();

        match self.file_kind(path) {
            FileKind::Plugin if !self.disallow_file_edit => {
                let relative = self.under(path, "plugins")?;
                let dir = relative.split('/').next()?;

                let mut params = vec![("file", relative)];
                if let Some(main_file) = self.plugins.get(dir) {
                    params.push(("plugin", main_file.as_str()));
                }
                params.push(("line", line.as_str()));
                Some(self.editor_url("plugin-editor.php", &params))
            }
            FileKind::Theme if !self.disallow_file_edit => {
                let relative = self.under(path, "themes")?;
                let theme = relative.split('/').next()?;
                Some(self.editor_url(
                    "theme-editor.php",
                    &[("file", relative), ("theme", theme), ("line", line.as_str())],
                ))
            }
            FileKind::Core => {
                let relative = path.strip_prefix(&self.abspath)?;
                Some(format!("{}/{}/{}#L{}", CORE_REPOSITORY, self.version, relative, line))
            }
            _ => None,
        }
    }
}
