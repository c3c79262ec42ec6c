//! Alliance file loading.
//!
//! One alliance per line, members separated by `;`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::info;

use crate::domain::{AllianceTable, Interner};

use super::LoadError;

pub fn load_alliances(path: &Path, interner: &mut Interner) -> Result<AllianceTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_alliances(BufReader::new(file), interner)
}

pub fn read_alliances<R: Read>(
    reader: R,
    interner: &mut Interner,
) -> Result<AllianceTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut groups = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let members = row
            .iter()
            .filter(|name| !name.is_empty())
            .map(|name| interner.intern(name))
            .collect::<Vec<_>>();
        groups.push(members);
    }

    let table = AllianceTable::new(groups);
    info!(alliances = table.len(), "loaded alliances");
    Ok(table)
}
