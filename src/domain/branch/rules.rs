use crate::shared::pagination::{
    cmp_ignore_case, cmp_opt_ignore_case, contains_opt_term, contains_term, Comparator, QueryRules,
};

use super::model::Branch;

/// Search over every text field; sort by any of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchQueryRules;

impl QueryRules<Branch> for BranchQueryRules {
    fn matches(&self, branch: &Branch, term: &str) -> bool {
        contains_term(&branch.name, term)
            || contains_term(&branch.address, term)
            || contains_term(&branch.city, term)
            || contains_term(&branch.state, term)
            || contains_opt_term(branch.postal_code.as_deref(), term)
    }

    fn comparator(&self, field: &str) -> Option<Comparator<Branch>> {
        match field {
            "name" => Some(|a, b| cmp_ignore_case(&a.name, &b.name)),
            "address" => Some(|a, b| cmp_ignore_case(&a.address, &b.address)),
            "city" => Some(|a, b| cmp_ignore_case(&a.city, &b.city)),
            "state" => Some(|a, b| cmp_ignore_case(&a.state, &b.state)),
            "postalcode" | "cep" => Some(|a, b| {
                cmp_opt_ignore_case(a.postal_code.as_deref(), b.postal_code.as_deref())
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{paginate, PageRequest, SortDirection};

    fn branch(id: i32, name: &str, city: &str, state: &str, cep: Option<&str>) -> Branch {
        Branch {
            id,
            name: name.into(),
            address: format!("Rua {id}"),
            city: city.into(),
            state: state.into(),
            postal_code: cep.map(Into::into),
        }
    }

    fn fixtures() -> Vec<Branch> {
        vec![
            branch(1, "Centro", "São Paulo", "SP", Some("01001-000")),
            branch(2, "Barra", "Rio de Janeiro", "RJ", None),
            branch(3, "Paulista", "São Paulo", "SP", Some("01310-100")),
        ]
    }

    #[test]
    fn search_covers_city_and_postal_code() {
        let req = PageRequest::default().with_search(Some("são".into()));
        let page = paginate(fixtures(), &req, &BranchQueryRules);
        assert_eq!(page.total_items(), 2);

        let req = PageRequest::default().with_search(Some("01310".into()));
        let page = paginate(fixtures(), &req, &BranchQueryRules);
        assert_eq!(page.items()[0].id, 3);
    }

    #[test]
    fn cep_is_an_alias_for_postal_code() {
        let req = PageRequest::default().with_sort(Some("CEP".into()), SortDirection::Desc);
        let ids: Vec<i32> = paginate(fixtures(), &req, &BranchQueryRules)
            .items()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let records = vec![
            branch(1, "Zeta", "Santos", "SP", None),
            branch(2, "alpha", "Santos", "SP", None),
            branch(3, "Beta", "Santos", "SP", None),
        ];
        let req = PageRequest::default().with_sort(Some("name".into()), SortDirection::Asc);
        let ids: Vec<i32> = paginate(records, &req, &BranchQueryRules)
            .items()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
