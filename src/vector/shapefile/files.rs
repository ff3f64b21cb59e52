/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::channel::ByteSource;
use super::reader::ShapefileReader;
use super::writer::ShapefileWriter;
use crate::configs::ShapefileConfigs;
use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Error, ErrorKind};
use std::path::{Path, PathBuf};

/// The sibling files that make up a shapefile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShpFileType {
    Shp,
    Shx,
    Dbf,
    Prj,
    Qix,
    Fix,
    Cpg,
}

impl ShpFileType {
    pub fn extension(&self) -> &'static str {
        match self {
            ShpFileType::Shp => "shp",
            ShpFileType::Shx => "shx",
            ShpFileType::Dbf => "dbf",
            ShpFileType::Prj => "prj",
            ShpFileType::Qix => "qix",
            ShpFileType::Fix => "fix",
            ShpFileType::Cpg => "cpg",
        }
    }

    pub fn all() -> [ShpFileType; 7] {
        [
            ShpFileType::Shp,
            ShpFileType::Shx,
            ShpFileType::Dbf,
            ShpFileType::Prj,
            ShpFileType::Qix,
            ShpFileType::Fix,
            ShpFileType::Cpg,
        ]
    }

    pub fn from_extension(ext: &str) -> Option<ShpFileType> {
        ShpFileType::all()
            .iter()
            .copied()
            .find(|t| t.extension().eq_ignore_ascii_case(ext))
    }
}

/// Resolves the file paths of a shapefile from any one of its files or
/// from its base name.
#[derive(Clone, Debug)]
pub struct ShpFiles {
    base: PathBuf,
    paths: HashMap<ShpFileType, PathBuf>,
}

impl ShpFiles {
    /// Extensions follow the case of the given name. A sibling that does not
    /// exist with that case is looked up case-insensitively in the directory.
    pub fn new<P: AsRef<Path>>(file_name: P) -> Result<ShpFiles> {
        let path = file_name.as_ref();
        let base = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                if ShpFileType::from_extension(ext).is_none() {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!("{} is not a shapefile component", path.display()),
                    )
                    .into());
                }
                path.with_extension("")
            }
            None => path.to_path_buf(),
        };
        let upper_case = path
            .to_str()
            .and_then(|s| s.chars().last())
            .map(|c| c.is_uppercase())
            .unwrap_or(false);

        let mut paths = HashMap::new();
        for file_type in ShpFileType::all().iter() {
            let ext = if upper_case {
                file_type.extension().to_uppercase()
            } else {
                file_type.extension().to_string()
            };
            let mut candidate = base.clone().into_os_string();
            candidate.push(".");
            candidate.push(&ext);
            let candidate = PathBuf::from(candidate);
            let resolved = if candidate.exists() {
                candidate
            } else {
                find_existing_file(&candidate).unwrap_or(candidate)
            };
            paths.insert(*file_type, resolved);
        }
        Ok(ShpFiles {
            base: base,
            paths: paths,
        })
    }

    pub fn get(&self, file_type: ShpFileType) -> &Path {
        &self.paths[&file_type]
    }

    pub fn exists(&self, file_type: ShpFileType) -> bool {
        self.get(file_type).is_file()
    }

    /// The base name of the files, without directory or extension.
    pub fn type_name(&self) -> String {
        self.base
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Opens a reader over the .shp file, with the .shx when it exists.
    pub fn open_reader(&self, configs: &ShapefileConfigs) -> Result<ShapefileReader> {
        let shp = File::open(self.get(ShpFileType::Shp))?;
        let shp = ByteSource::from_file(shp, configs.use_memory_mapped)?;
        let shx = if self.exists(ShpFileType::Shx) {
            let f = File::open(self.get(ShpFileType::Shx))?;
            Some(ByteSource::from_file(f, configs.use_memory_mapped)?)
        } else {
            None
        };
        ShapefileReader::open(shp, shx, configs)
    }

    /// Creates (or truncates) the .shp and .shx files.
    pub fn create_writer(&self) -> Result<ShapefileWriter<BufWriter<File>>> {
        let shp = File::create(self.get(ShpFileType::Shp))?;
        let shx = File::create(self.get(ShpFileType::Shx))?;
        Ok(ShapefileWriter::new(BufWriter::new(shp), BufWriter::new(shx)))
    }

    /// Removes every component file that exists. Returns false if any
    /// could not be removed.
    pub fn delete(&self) -> bool {
        let mut all_removed = true;
        for file_type in ShpFileType::all().iter() {
            if self.exists(*file_type) && fs::remove_file(self.get(*file_type)).is_err() {
                all_removed = false;
            }
        }
        all_removed
    }
}

fn find_existing_file(candidate: &Path) -> Option<PathBuf> {
    let name = candidate.file_name()?.to_str()?;
    let dir = match candidate.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
}
