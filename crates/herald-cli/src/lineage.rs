//! `herald lineage`: print the standard kind hierarchy.

use herald_core::standard::standard_kinds;

/// One line per standard kind: `Kind: Kind -> Parent -> ... -> Root`.
pub fn render() -> Vec<String> {
    standard_kinds()
        .iter()
        .map(|kind| {
            let chain: Vec<_> = kind.lineage().iter().map(|k| k.name()).collect();
            format!("{}: {}", kind.name(), chain.join(" -> "))
        })
        .collect()
}
