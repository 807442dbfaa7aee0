//! Búsqueda local sobre listados ya cargados
//!
//! Filtro por subcadena, sin distinguir mayúsculas, sobre los campos de texto
//! que cada entidad declara.

/// Entidad filtrable por texto libre
pub trait Searchable {
    /// Campos de texto sobre los que se busca
    fn search_fields(&self) -> Vec<String>;

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Devuelve las entidades que contienen `term` en alguno de sus campos
pub fn filter_by_search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, &'static str);

    impl Searchable for Item {
        fn search_fields(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn blank_term_keeps_everything() {
        let items = vec![Item("a", "b"), Item("c", "d")];
        assert_eq!(filter_by_search(&items, "  ").len(), 2);
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let items = vec![Item("Bus Norte", "ABC123"), Item("Van Sur", "XYZ789")];
        let found = filter_by_search(&items, "abc");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "Bus Norte");
    }
}
