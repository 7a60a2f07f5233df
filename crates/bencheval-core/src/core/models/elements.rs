use phf::{Map, phf_map};

/// Number of elements in the periodic table covered by this crate (H through Lr).
pub const MAX_ELEMENT: usize = 103;

/// Conversion factor from Bohr to Ångström (CODATA 2018).
pub const BOHR_TO_ANGSTROM: f64 = 0.529177210903;

static SYMBOLS: [&str; MAX_ELEMENT] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr",
];

static ATOMIC_NUMBERS: Map<&'static str, usize> = phf_map! {
    "h" => 1, "he" => 2, "li" => 3, "be" => 4, "b" => 5, "c" => 6, "n" => 7, "o" => 8,
    "f" => 9, "ne" => 10, "na" => 11, "mg" => 12, "al" => 13, "si" => 14, "p" => 15,
    "s" => 16, "cl" => 17, "ar" => 18, "k" => 19, "ca" => 20, "sc" => 21, "ti" => 22,
    "v" => 23, "cr" => 24, "mn" => 25, "fe" => 26, "co" => 27, "ni" => 28, "cu" => 29,
    "zn" => 30, "ga" => 31, "ge" => 32, "as" => 33, "se" => 34, "br" => 35, "kr" => 36,
    "rb" => 37, "sr" => 38, "y" => 39, "zr" => 40, "nb" => 41, "mo" => 42, "tc" => 43,
    "ru" => 44, "rh" => 45, "pd" => 46, "ag" => 47, "cd" => 48, "in" => 49, "sn" => 50,
    "sb" => 51, "te" => 52, "i" => 53, "xe" => 54, "cs" => 55, "ba" => 56, "la" => 57,
    "ce" => 58, "pr" => 59, "nd" => 60, "pm" => 61, "sm" => 62, "eu" => 63, "gd" => 64,
    "tb" => 65, "dy" => 66, "ho" => 67, "er" => 68, "tm" => 69, "yb" => 70, "lu" => 71,
    "hf" => 72, "ta" => 73, "w" => 74, "re" => 75, "os" => 76, "ir" => 77, "pt" => 78,
    "au" => 79, "hg" => 80, "tl" => 81, "pb" => 82, "bi" => 83, "po" => 84, "at" => 85,
    "rn" => 86, "fr" => 87, "ra" => 88, "ac" => 89, "th" => 90, "pa" => 91, "u" => 92,
    "np" => 93, "pu" => 94, "am" => 95, "cm" => 96, "bk" => 97, "cf" => 98, "es" => 99,
    "fm" => 100, "md" => 101, "no" => 102, "lr" => 103,
};

/// Returns the element symbol for a 0-based element index.
pub fn symbol(index: usize) -> Option<&'static str> {
    SYMBOLS.get(index).copied()
}

/// Returns the 0-based element index for a symbol, case-insensitively.
pub fn element_index(symbol: &str) -> Option<usize> {
    ATOMIC_NUMBERS
        .get(symbol.trim().to_ascii_lowercase().as_str())
        .map(|number| number - 1)
}
