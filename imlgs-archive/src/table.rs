//! Column mapping for the tabular export collaborator.
//!
//! The IMLGS web interface ships a CSV export whose header row holds
//! human-readable labels. The mapping below pins each label to a
//! stable column name and SQL type; [`import_sql`] renders the import
//! statement a DuckDB-compatible loader executes to build the columnar
//! table. Executing the statement is the collaborator's job, not ours.

/// One (source label, target column, target type) mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header label in the CSV export.
    pub label: &'static str,
    /// Target column name.
    pub column: &'static str,
    /// Target SQL type, including default/key clauses.
    pub sql_type: &'static str,
}

/// Ordered column mapping for the sample CSV export. `imlgs_number`
/// is the primary key.
pub const SAMPLE_COLUMNS: [ColumnSpec; 24] = [
    ColumnSpec {
        label: "Repository",
        column: "repository",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Ship/Platform",
        column: "ship_platform",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Cruise ID",
        column: "cruiseid",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Sample ID",
        column: "sampleid",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Sampling Device",
        column: "sampl_device",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Date Sample Collected",
        column: "coll_date",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Date Sample Collection Ended",
        column: "coll_date_end",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Latitude",
        column: "latitude",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Ending Latitude",
        column: "latitude_end",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Longitude",
        column: "longitude",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Ending Longitude",
        column: "longitude_end",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Water Depth (m)",
        column: "depth",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Ending Water Depth (m)",
        column: "depth_end",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Storage Method",
        column: "storage_method",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Core Length (cm)",
        column: "core_length",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Core Diameter (cm)",
        column: "core_diameter",
        sql_type: "DOUBLE DEFAULT NULL",
    },
    ColumnSpec {
        label: "Principal Investigator",
        column: "p_investigator",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Physiographic Province",
        column: "physio_province",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Lake",
        column: "lake",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "IGSN",
        column: "igsn",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Alternate Cruise/Leg",
        column: "alt_cruise",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Sample Comments",
        column: "comments",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "Data and Information for Sample",
        column: "sample_info",
        sql_type: "VARCHAR DEFAULT NULL",
    },
    ColumnSpec {
        label: "IMLGS Number",
        column: "imlgs_number",
        sql_type: "VARCHAR PRIMARY KEY",
    },
];

/// Render the columnar import statement for a CSV export.
///
/// The first CSV row holds the human labels and is skipped; columns
/// are renamed positionally in mapping order.
pub fn import_sql(csv_source: &str) -> String {
    let names: Vec<String> = SAMPLE_COLUMNS
        .iter()
        .map(|c| format!("'{}'", c.column))
        .collect();
    format!(
        "CREATE TABLE imlgs AS SELECT * FROM read_csv('{}', skip=1, names=[\n{}]);",
        csv_source,
        names.join(",\n")
    )
}
