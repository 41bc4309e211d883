//! Defines the [`Config`] type, which tells both binaries where the blog
//! repository keeps its posts, post images, and front-end listing file.
//!
//! Configuration is optional. [`Config::from_directory`] walks up from the
//! starting directory looking for a `postpress.yaml` project file; the
//! directory containing it becomes the project root. If no project file is
//! found, the starting directory is the project root and every setting takes
//! its default value.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The name of the optional project file.
pub const PROJECT_FILE: &str = "postpress.yaml";

const DEFAULT_SOURCE_PREFIX: &str = "https://secondthoughts.ai/p/";
const DEFAULT_POSTS_DIRECTORY: &str = "posts";
const DEFAULT_IMAGES_DIRECTORY: &str = "public/post-images";
const DEFAULT_HEADER_FILE_NAME: &str = "header.png";
const DEFAULT_LISTING_FILE: &str = "app/(main)/writing-spotlight.tsx";

/// The on-disk shape of `postpress.yaml`. Every key is optional.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct Project {
    source_prefix: Option<String>,
    posts_directory: Option<PathBuf>,
    images_directory: Option<PathBuf>,
    header_file_name: Option<String>,
    listing_file: Option<PathBuf>,
}

/// Resolved settings. All paths are absolute or relative to the process'
/// working directory (i.e., already joined onto the project root).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The directory that contained `postpress.yaml`, or the starting
    /// directory if there was none.
    pub root_directory: PathBuf,

    /// Article URLs must begin with this prefix; the remainder is the post's
    /// slug.
    pub source_prefix: String,

    /// Where `<slug>.mdx` stubs are written. Must already exist.
    pub posts_directory: PathBuf,

    /// Parent of the per-post image directories.
    pub images_directory: PathBuf,

    /// File name of the normalized header image inside a post's image
    /// directory.
    pub header_file_name: String,

    /// The front-end source file declaring `postSlugs`.
    pub listing_file: PathBuf,
}

impl Config {
    /// Returns the default configuration rooted at `root`.
    pub fn with_root(root: &Path) -> Config {
        Config::from_project(root, Project::default())
    }

    /// Searches `dir` and its ancestors for `postpress.yaml`. Falls back to
    /// [`Config::with_root`] on `dir` when no project file exists.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut candidate = Some(dir);
        while let Some(current) = candidate {
            let path = current.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            candidate = current.parent();
        }
        Ok(Config::with_root(dir))
    }

    /// Loads a specific project file. Its parent directory becomes the
    /// project root.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = match contents.trim().is_empty() {
            true => Project::default(),
            false => serde_yaml::from_str(&contents).map_err(|err| Error::Deserialize {
                path: path.to_owned(),
                err,
            })?,
        };
        match path.parent() {
            Some(root) => Ok(Config::from_project(root, project)),
            None => Err(Error::NoParent(path.to_owned())),
        }
    }

    fn from_project(root: &Path, project: Project) -> Config {
        let resolve = |rel: Option<PathBuf>, default: &str| {
            root.join(rel.unwrap_or_else(|| PathBuf::from(default)))
        };
        Config {
            root_directory: root.to_owned(),
            source_prefix: project
                .source_prefix
                .unwrap_or_else(|| DEFAULT_SOURCE_PREFIX.to_owned()),
            posts_directory: resolve(project.posts_directory, DEFAULT_POSTS_DIRECTORY),
            images_directory: resolve(project.images_directory, DEFAULT_IMAGES_DIRECTORY),
            header_file_name: project
                .header_file_name
                .unwrap_or_else(|| DEFAULT_HEADER_FILE_NAME.to_owned()),
            listing_file: resolve(project.listing_file, DEFAULT_LISTING_FILE),
        }
    }

    /// `{posts_directory}/{slug}.mdx`
    pub fn stub_path(&self, slug: &str) -> PathBuf {
        self.posts_directory.join(format!("{}.mdx", slug))
    }

    /// `{images_directory}/{slug}`
    pub fn image_directory(&self, slug: &str) -> PathBuf {
        self.images_directory.join(slug)
    }

    /// `{images_directory}/{slug}/{header_file_name}`
    pub fn header_path(&self, slug: &str) -> PathBuf {
        self.image_directory(slug).join(&self.header_file_name)
    }
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading `postpress.yaml`.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the project file exists but can't be read.
    #[error("Opening project file `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the project file isn't valid YAML or has unknown keys.
    #[error("Loading project file `{}`", .path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        err: serde_yaml::Error,
    },

    /// Returned when the project file path has no parent directory.
    #[error("Can't get parent directory for project file `{}`", .0.display())]
    NoParent(PathBuf),
}
