use sourmash::encodings::HashFunctions;

/// Default k-mer size for searches
pub const DEFAULT_KSIZE: u32 = 31;

/// Default scale factor queries are downsampled to
pub const DEFAULT_SCALED: u64 = 1000;

/// Molecule type (alphabet) a sketch was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Moltype {
    #[default]
    #[value(alias = "DNA")]
    Dna,
    Protein,
    Dayhoff,
    Hp,
}

impl Moltype {
    /// Parse the `molecule` field of a signature file
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dna" => Some(Self::Dna),
            "protein" => Some(Self::Protein),
            "dayhoff" => Some(Self::Dayhoff),
            "hp" => Some(Self::Hp),
            _ => None,
        }
    }

    /// Hash function sketches of this alphabet are built with
    pub fn hash_function(self) -> HashFunctions {
        match self {
            Self::Dna => HashFunctions::Murmur64Dna,
            Self::Protein => HashFunctions::Murmur64Protein,
            Self::Dayhoff => HashFunctions::Murmur64Dayhoff,
            Self::Hp => HashFunctions::Murmur64Hp,
        }
    }

    pub fn from_hash_function(hash_function: &HashFunctions) -> Option<Self> {
        match hash_function {
            HashFunctions::Murmur64Dna => Some(Self::Dna),
            HashFunctions::Murmur64Protein => Some(Self::Protein),
            HashFunctions::Murmur64Dayhoff => Some(Self::Dayhoff),
            HashFunctions::Murmur64Hp => Some(Self::Hp),
            _ => None,
        }
    }

    /// Factor between the k-mer size and the `ksize` stored in signature files.
    ///
    /// Amino-acid sketches store their k-mer size in nucleotides.
    pub fn ksize_factor(self) -> u32 {
        match self {
            Self::Dna => 1,
            Self::Protein | Self::Dayhoff | Self::Hp => 3,
        }
    }

    /// Name as written in signature files and output tables
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dna => "DNA",
            Self::Protein => "protein",
            Self::Dayhoff => "dayhoff",
            Self::Hp => "hp",
        }
    }
}

impl std::fmt::Display for Moltype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters shared by every comparison in a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// K-mer size sketches must have
    pub ksize: u32,

    /// Alphabet sketches must have
    pub moltype: Moltype,

    /// Scale factor queries are downsampled to (never refined below their own)
    pub scaled: u64,

    /// Fail when a subject sketch carries no abundance information
    pub require_abundance: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ksize: DEFAULT_KSIZE,
            moltype: Moltype::Dna,
            scaled: DEFAULT_SCALED,
            require_abundance: false,
        }
    }
}
