use promptmap_archive::Entry;

/// Expand entries into `branches` independent copies each.
///
/// Branch identifiers are the unpadded 0-based branch index prefixed to
/// the original path. All branches of an earlier entry precede any branch
/// of a later one. `branches == 1` still renames to `0_...`: once
/// branching is requested there is no bypass path, so downstream
/// consumers see a uniform naming scheme.
pub fn expand(entries: Vec<Entry>, branches: usize) -> Vec<Entry> {
    let mut expanded = Vec::with_capacity(entries.len() * branches);
    for entry in entries {
        for i in 0..branches {
            expanded.push(Entry::new(
                format!("{i}_{}", entry.path),
                entry.content.clone(),
            ));
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_branches_in_index_order() {
        let out = expand(vec![Entry::new("f.txt", "C")], 3);
        assert_eq!(
            out,
            vec![
                Entry::new("0_f.txt", "C"),
                Entry::new("1_f.txt", "C"),
                Entry::new("2_f.txt", "C"),
            ]
        );
    }

    #[test]
    fn single_branch_still_renames() {
        let out = expand(vec![Entry::new("f.txt", "C")], 1);
        assert_eq!(out, vec![Entry::new("0_f.txt", "C")]);
    }

    #[test]
    fn earlier_entries_precede_later_ones() {
        let out = expand(vec![Entry::new("a", "1"), Entry::new("b", "2")], 2);
        let paths: Vec<&str> = out.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["0_a", "1_a", "0_b", "1_b"]);
    }

    #[test]
    fn indices_are_not_padded() {
        let out = expand(vec![Entry::new("f", "C")], 11);
        assert_eq!(out[10].path, "10_f");
        assert_eq!(out[2].path, "2_f");
    }
}
