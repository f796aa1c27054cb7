//! Angular momentum bookkeeping shared by the parser and the basis set builder.
//!
//! All tables are plain constants, built at compile time.

/// Highest angular momentum that can be named in a basis file.
pub const MAX_ANGULAR_MOMENTUM: u32 = 7;

/// Shell letters, indexed by angular momentum. `J` is skipped by convention and
/// `L` is reserved for the combined SP shell.
const LETTERS: [char; MAX_ANGULAR_MOMENTUM as usize + 1] = ['S', 'P', 'D', 'F', 'G', 'H', 'I', 'K'];

const MAX_CARTESIAN: usize = cartesian_count(MAX_ANGULAR_MOMENTUM);

/// (lx, ly, lz) for every l up to [`MAX_ANGULAR_MOMENTUM`], in canonical order.
static CARTESIAN_COMPONENTS: [[[u8; 3]; MAX_CARTESIAN]; MAX_ANGULAR_MOMENTUM as usize + 1] =
    build_cartesian_components();

const fn build_cartesian_components(
) -> [[[u8; 3]; MAX_CARTESIAN]; MAX_ANGULAR_MOMENTUM as usize + 1] {
    let mut table = [[[0u8; 3]; MAX_CARTESIAN]; MAX_ANGULAR_MOMENTUM as usize + 1];

    let mut l = 0;
    while l <= MAX_ANGULAR_MOMENTUM as usize {
        let mut index = 0;
        let mut i = 0;
        while i <= l {
            let lx = l - i;
            let mut j = 0;
            while j <= i {
                let ly = i - j;
                let lz = j;
                table[l][index] = [lx as u8, ly as u8, lz as u8];
                index += 1;
                j += 1;
            }
            i += 1;
        }
        l += 1;
    }

    table
}

/// Maps a shell letter (case-insensitive) to its angular momentum.
pub fn am_from_letter(letter: char) -> Option<u32> {
    let letter = letter.to_ascii_uppercase();
    LETTERS
        .iter()
        .position(|&candidate| candidate == letter)
        .map(|am| am as u32)
}

/// Upper-case shell letter of an angular momentum.
pub fn letter_from_am(am: u32) -> Option<char> {
    LETTERS.get(am as usize).copied()
}

/// Number of cartesian components of a shell, `(l+1)(l+2)/2`.
pub const fn cartesian_count(am: u32) -> usize {
    let l = am as usize;
    (l + 1) * (l + 2) / 2
}

/// Number of real solid harmonics of a shell, `2l+1`.
pub const fn spherical_count(am: u32) -> usize {
    2 * am as usize + 1
}

/// Number of basis functions a shell contributes under the given convention.
pub const fn function_count(am: u32, spherical: bool) -> usize {
    if spherical {
        spherical_count(am)
    } else {
        cartesian_count(am)
    }
}

/// The (lx, ly, lz) exponents of the cartesian components of a shell, lx
/// running fastest downwards.
///
/// # Panics
/// If `am` exceeds [`MAX_ANGULAR_MOMENTUM`].
pub fn cartesian_components(am: u32) -> &'static [[u8; 3]] {
    &CARTESIAN_COMPONENTS[am as usize][..cartesian_count(am)]
}

/// Harmonic convention of a basis set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    #[default]
    Cartesian,
    Spherical,
}

impl Convention {
    pub fn is_spherical(self) -> bool {
        matches!(self, Self::Spherical)
    }

    pub fn from_puream(puream: bool) -> Self {
        if puream {
            Self::Spherical
        } else {
            Self::Cartesian
        }
    }
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cartesian => write!(f, "cartesian"),
            Self::Spherical => write!(f, "spherical"),
        }
    }
}
