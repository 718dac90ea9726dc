// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: dbt projects on disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A dbt project in a temporary directory, removed on drop
#[derive(Debug)]
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// An empty directory
    pub fn empty() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// A small jaffle_shop project on postgres
    ///
    /// - models `orders` (documented in `models/schema.yml`) and `stg_orders`
    /// - source `raw` with table `orders`
    /// - macro `cents_to_dollars`, variable `start_date`
    /// - `profiles.yml` next to `dbt_project.yml`
    pub fn jaffle_shop() -> io::Result<Self> {
        let fixture = Self::empty()?;
        fixture.write(
            "dbt_project.yml",
            "name: jaffle_shop\nprofile: jaffle_shop\nconfig-version: 2\n\nvars:\n  start_date: '2018-01-01'\n",
        )?;
        fixture.write(
            "profiles.yml",
            "jaffle_shop:\n  target: dev\n  outputs:\n    dev:\n      type: postgres\n",
        )?;
        fixture.write(
            "models/orders.sql",
            "select *\nfrom {{ ref('stg_orders') }}\nwhere ordered_at > '{{ var(\"start_date\") }}'\n",
        )?;
        fixture.write(
            "models/staging/stg_orders.sql",
            "select * from {{ source('raw', 'orders') }}\n",
        )?;
        fixture.write(
            "models/schema.yml",
            "version: 2\n\nmodels:\n  - name: orders\n    description: One row per order\n",
        )?;
        fixture.write(
            "models/staging/sources.yml",
            "version: 2\n\nsources:\n  - name: raw\n    description: Raw application data\n    tables:\n      - name: orders\n        description: Raw orders\n",
        )?;
        fixture.write(
            "macros/cents_to_dollars.sql",
            "{% macro cents_to_dollars(column_name) %}\n({{ column_name }} / 100)\n{% endmacro %}\n",
        )?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a project file
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a project file, creating parent directories
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    /// Read a project file back
    pub fn read(&self, relative: &str) -> io::Result<String> {
        fs::read_to_string(self.path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaffle_shop_layout() {
        let fixture = ProjectFixture::jaffle_shop().unwrap();
        assert!(fixture.path("dbt_project.yml").is_file());
        assert!(fixture.path("models/staging/stg_orders.sql").is_file());
        assert!(fixture.read("macros/cents_to_dollars.sql").unwrap().starts_with("{% macro"));
    }
}
