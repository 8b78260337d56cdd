use std::fmt;

// ---------------------------------------------------------------------------
// Species – tagged classification of kinetic-model labels
// ---------------------------------------------------------------------------

/// One species tracked by the kinetic model.
///
/// Classification happens once when solver output is ingested
/// ([`super::trajectory::KineticTrajectory::from_labeled`]); downstream code
/// matches on the tag instead of re-inspecting label strings at every
/// plotting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    /// Free enzyme, `E`.
    Enzyme,
    /// Activated enzyme, `E*`.
    ActivatedEnzyme,
    /// Released AMP, `A1`.
    Amp,
    /// Free RNA with a poly(A) tail of `len` nucleotides, `TA<len>`.
    Rna { len: u32 },
    /// Enzyme-bound RNA, `E*TA<len>`.
    EnzymeRna { len: u32 },
}

impl Species {
    /// Parse a kinetic-model label.  Returns `None` for anything outside
    /// the grammar `E | E* | A1 | TA<len> | E*TA<len>`.
    pub fn parse(label: &str) -> Option<Species> {
        match label {
            "E" => return Some(Species::Enzyme),
            "E*" => return Some(Species::ActivatedEnzyme),
            "A1" => return Some(Species::Amp),
            _ => {}
        }
        if let Some(rest) = label.strip_prefix("E*TA") {
            return rest.parse().ok().map(|len| Species::EnzymeRna { len });
        }
        if let Some(rest) = label.strip_prefix("TA") {
            return rest.parse().ok().map(|len| Species::Rna { len });
        }
        None
    }

    /// Whether this is an enzyme state rather than an RNA/product variant.
    pub fn is_enzyme_state(&self) -> bool {
        matches!(self, Species::Enzyme | Species::ActivatedEnzyme)
    }

    /// Poly(A) tail length for RNA variants (free or enzyme-bound).
    pub fn product_len(&self) -> Option<u32> {
        match self {
            Species::Rna { len } | Species::EnzymeRna { len } => Some(*len),
            _ => None,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Enzyme => write!(f, "E"),
            Species::ActivatedEnzyme => write!(f, "E*"),
            Species::Amp => write!(f, "A1"),
            Species::Rna { len } => write!(f, "TA{len}"),
            Species::EnzymeRna { len } => write!(f, "E*TA{len}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for label in ["E", "E*", "A1", "TA1", "TA20", "E*TA7"] {
            let species = Species::parse(label).unwrap();
            assert_eq!(species.to_string(), label);
        }
    }

    #[test]
    fn classification_is_tagged_not_stringly() {
        assert!(Species::parse("E").unwrap().is_enzyme_state());
        assert!(Species::parse("E*").unwrap().is_enzyme_state());
        assert!(!Species::parse("TA5").unwrap().is_enzyme_state());
        assert_eq!(Species::parse("TA5").unwrap().product_len(), Some(5));
        assert_eq!(Species::parse("E*TA5").unwrap().product_len(), Some(5));
        assert_eq!(Species::parse("A1").unwrap().product_len(), None);
    }

    #[test]
    fn unknown_labels_are_rejected() {
        for label in ["", "X", "TA", "TAx", "E**", "E*TA", "ta4"] {
            assert_eq!(Species::parse(label), None, "label {label:?}");
        }
    }
}
