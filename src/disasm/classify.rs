//! Mnemonic classification.
//!
//! Rules are an ordered table evaluated first-match-wins; the ordering is
//! load-bearing because prefixes overlap (every "bl"/"br"/... mnemonic also
//! matches the bare "b" prefix).

use super::types::InstructionCategory;

#[derive(Debug, Clone, Copy)]
enum MatchKind {
    /// Mnemonic starts with any of the patterns
    Prefix,
    /// Mnemonic equals one of the patterns
    Exact,
}

/// Ordered classification rules.
///
/// The "b" prefix intentionally over-matches: any mnemonic starting with
/// "b" (e.g. "bic") lands in Branch before later rules are consulted. That
/// coarseness is inherited behavior, kept as-is.
const RULES: &[(MatchKind, &[&str], InstructionCategory)] = &[
    (
        MatchKind::Prefix,
        &[
            "b", "bl", "br", "blr", "cbz", "cbnz", "tbz", "jmp", "call", "je", "jne",
        ],
        InstructionCategory::Branch,
    ),
    (
        MatchKind::Exact,
        &["ret", "retn"],
        InstructionCategory::Return,
    ),
    (
        MatchKind::Prefix,
        &["ldr", "str", "ldp", "stp", "mov", "lea"],
        InstructionCategory::Memory,
    ),
    (
        MatchKind::Prefix,
        &["add", "sub", "mul", "div", "cmp", "xor", "and", "or"],
        InstructionCategory::Math,
    ),
];

/// Classify a lowercased mnemonic into a coarse category.
///
/// Pure and total: every string maps to exactly one category.
pub fn classify(mnemonic: &str) -> InstructionCategory {
    for (kind, patterns, category) in RULES {
        let hit = match kind {
            MatchKind::Prefix => patterns.iter().any(|p| mnemonic.starts_with(p)),
            MatchKind::Exact => patterns.contains(&mnemonic),
        };
        if hit {
            return *category;
        }
    }
    InstructionCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_prefixes() {
        assert_eq!(classify("b"), InstructionCategory::Branch);
        assert_eq!(classify("bl"), InstructionCategory::Branch);
        assert_eq!(classify("cbz"), InstructionCategory::Branch);
        assert_eq!(classify("jmp"), InstructionCategory::Branch);
        assert_eq!(classify("call"), InstructionCategory::Branch);
        assert_eq!(classify("je"), InstructionCategory::Branch);
    }

    #[test]
    fn bare_b_prefix_wins_over_later_rules() {
        // "bic" is bitwise math on arm64, but rule order puts it in Branch
        assert_eq!(classify("bic"), InstructionCategory::Branch);
    }

    #[test]
    fn return_is_exact_match_only() {
        assert_eq!(classify("ret"), InstructionCategory::Return);
        assert_eq!(classify("retn"), InstructionCategory::Return);
        // not an exact match, falls through past the Return rule
        assert_ne!(classify("return"), InstructionCategory::Return);
    }

    #[test]
    fn memory_and_math_prefixes() {
        assert_eq!(classify("ldr"), InstructionCategory::Memory);
        assert_eq!(classify("stp"), InstructionCategory::Memory);
        assert_eq!(classify("movzx"), InstructionCategory::Memory);
        assert_eq!(classify("lea"), InstructionCategory::Memory);
        assert_eq!(classify("add"), InstructionCategory::Math);
        assert_eq!(classify("subs"), InstructionCategory::Math);
        assert_eq!(classify("xor"), InstructionCategory::Math);
        assert_eq!(classify("orr"), InstructionCategory::Math);
    }

    #[test]
    fn unmatched_falls_through_to_other() {
        assert_eq!(classify("nop"), InstructionCategory::Other);
        assert_eq!(classify("int3"), InstructionCategory::Other);
        assert_eq!(classify(""), InstructionCategory::Other);
    }

    #[test]
    fn classification_is_deterministic() {
        for m in ["ret", "bic", "nop", "ldr x0, nonsense", ""] {
            assert_eq!(classify(m), classify(m));
        }
    }
}
