/// Tables backing the herd records. Applied at every connection open; all
/// statements are idempotent.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS properties (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT,
    acreage REAL,
    is_leased INTEGER NOT NULL DEFAULT 0,
    lease_start_date TEXT,
    lease_end_date TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS fields (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    property_id TEXT NOT NULL REFERENCES properties(id),
    acreage REAL,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS animals (
    id TEXT PRIMARY KEY,
    tag_number TEXT NOT NULL UNIQUE,
    name TEXT,
    animal_type TEXT NOT NULL,
    sex TEXT NOT NULL,
    date_of_birth TEXT,
    breeding_method TEXT,
    sire_id TEXT REFERENCES animals(id),
    dam_id TEXT REFERENCES animals(id),
    herd_name TEXT,
    organic INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS vaccinations (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id),
    vaccine_name TEXT NOT NULL,
    administered_date TEXT NOT NULL,
    dosage TEXT,
    administered_by TEXT,
    next_due_date TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id),
    event_type TEXT NOT NULL,
    event_date TEXT NOT NULL,
    description TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS calving_records (
    id TEXT PRIMARY KEY,
    dam_id TEXT NOT NULL REFERENCES animals(id),
    calving_date TEXT NOT NULL,
    calf_id TEXT REFERENCES animals(id),
    calf_sex TEXT,
    complications INTEGER NOT NULL DEFAULT 0,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS slaughter_records (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id),
    slaughter_date TEXT NOT NULL,
    live_weight REAL,
    carcass_weight REAL,
    processor TEXT,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_properties_name ON properties(name);
"#;
