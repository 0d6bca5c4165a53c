use std::fmt;

/// A column of a solution log
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// GPS time, seconds of week
    EpochTime,
    /// ECEF X estimate (m)
    X,
    /// ECEF Y estimate (m)
    Y,
    /// ECEF Z estimate (m)
    Z,
    /// Receiver clock bias scaled by the speed of light (m)
    ClockBias,
    Hdop,
    Vdop,
    Pdop,
    Gdop,
    /// Number of satellites used in the fix
    NumSats,
    /// Local tangent plane residuals against the surveyed position (m)
    EastError,
    NorthError,
    UpError,
}

impl Column {
    pub const ALL: [Self; 13] = [
        Self::EpochTime,
        Self::X,
        Self::Y,
        Self::Z,
        Self::ClockBias,
        Self::Hdop,
        Self::Vdop,
        Self::Pdop,
        Self::Gdop,
        Self::NumSats,
        Self::EastError,
        Self::NorthError,
        Self::UpError,
    ];

    /// Header used in labelled solution logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::EpochTime => "EpochTime",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::ClockBias => "ClockBias",
            Self::Hdop => "HDOP",
            Self::Vdop => "VDOP",
            Self::Pdop => "PDOP",
            Self::Gdop => "GDOP",
            Self::NumSats => "NumSats",
            Self::EastError => "EastError",
            Self::NorthError => "NorthError",
            Self::UpError => "UpError",
        }
    }

    /// Name given to the column in the headerless five column layout, if it has one
    pub const fn alias(self) -> Option<&'static str> {
        match self {
            Self::EpochTime => Some("time"),
            Self::X => Some("x"),
            Self::Y => Some("y"),
            Self::Z => Some("z"),
            Self::ClockBias => Some("cdt"),
            _ => None,
        }
    }

    /// Resolve a header to a column, accepting both the labelled name and the alias
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.name() == header || column.alias() == Some(header))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two shapes of solution log the store understands.
///
/// The schema only decides which columns must be present: construction of the store is shared,
/// and the required column check is driven by [`RecordSchema::required_columns`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordSchema {
    /// Time, ECEF position and clock bias
    Minimal,
    /// Minimal columns plus DOP, satellite count and local tangent plane errors
    Extended,
}

impl RecordSchema {
    pub const fn required_columns(self) -> &'static [Column] {
        match self {
            Self::Minimal => &[
                Column::EpochTime,
                Column::X,
                Column::Y,
                Column::Z,
                Column::ClockBias,
            ],
            Self::Extended => &Column::ALL,
        }
    }

    pub fn requires(self, column: Column) -> bool {
        self.required_columns().contains(&column)
    }
}

impl fmt::Display for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => f.write_str("minimal"),
            Self::Extended => f.write_str("extended"),
        }
    }
}
