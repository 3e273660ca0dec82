use crate::shared::pagination::{
    cmp_ignore_case, cmp_opt_ignore_case, contains_opt_term, contains_term, Comparator, QueryRules,
};

use super::model::Employee;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeQueryRules;

impl QueryRules<Employee> for EmployeeQueryRules {
    fn matches(&self, employee: &Employee, term: &str) -> bool {
        contains_term(&employee.name, term)
            || contains_term(&employee.email, term)
            || contains_term(&employee.role, term)
            || contains_opt_term(employee.branch_name(), term)
    }

    fn comparator(&self, field: &str) -> Option<Comparator<Employee>> {
        match field {
            "name" => Some(|a, b| cmp_ignore_case(&a.name, &b.name)),
            "email" => Some(|a, b| cmp_ignore_case(&a.email, &b.email)),
            "role" => Some(|a, b| cmp_ignore_case(&a.role, &b.role)),
            "branch" => Some(|a, b| cmp_opt_ignore_case(a.branch_name(), b.branch_name())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::branch::BranchSummary;
    use crate::shared::pagination::{paginate, PageRequest, SortDirection};

    fn employee(id: i32, name: &str, role: &str, branch: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            email: format!("{}@fleet.test", name.to_lowercase()),
            branch_id: id,
            role: role.into(),
            branch: Some(BranchSummary {
                id,
                name: branch.into(),
                city: "Curitiba".into(),
                state: "PR".into(),
            }),
        }
    }

    #[test]
    fn search_includes_branch_name() {
        let records = vec![
            employee(1, "Ana", "Mechanic", "Norte"),
            employee(2, "Bruno", "Manager", "Sul"),
        ];
        let req = PageRequest::default().with_search(Some("SUL".into()));
        let page = paginate(records, &req, &EmployeeQueryRules);
        assert_eq!(page.items()[0].name, "Bruno");
        assert_eq!(page.total_items(), 1);
    }

    #[test]
    fn sort_by_branch_uses_branch_name() {
        let records = vec![
            employee(1, "Ana", "Mechanic", "Oeste"),
            employee(2, "Bruno", "Manager", "Leste"),
            employee(3, "Carla", "Driver", "Norte"),
        ];
        let req = PageRequest::default().with_sort(Some("branch".into()), SortDirection::Asc);
        let names: Vec<String> = paginate(records, &req, &EmployeeQueryRules)
            .into_items()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bruno", "Carla", "Ana"]);
    }
}
