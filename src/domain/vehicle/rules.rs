use crate::shared::pagination::{
    cmp_ignore_case, cmp_opt_ignore_case, contains_opt_term, contains_term, Comparator, QueryRules,
};

use super::model::Vehicle;

#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleQueryRules;

impl QueryRules<Vehicle> for VehicleQueryRules {
    fn matches(&self, vehicle: &Vehicle, term: &str) -> bool {
        contains_term(&vehicle.brand, term)
            || contains_term(&vehicle.model, term)
            || contains_term(&vehicle.plate, term)
            || contains_opt_term(vehicle.color.as_deref(), term)
            || contains_opt_term(vehicle.branch_name(), term)
    }

    fn comparator(&self, field: &str) -> Option<Comparator<Vehicle>> {
        match field {
            "brand" => Some(|a, b| cmp_ignore_case(&a.brand, &b.brand)),
            "model" => Some(|a, b| cmp_ignore_case(&a.model, &b.model)),
            "year" => Some(|a, b| a.year.cmp(&b.year)),
            "plate" => Some(|a, b| cmp_ignore_case(&a.plate, &b.plate)),
            "mileage" => Some(|a, b| a.mileage.cmp(&b.mileage)),
            "branch" => Some(|a, b| cmp_opt_ignore_case(a.branch_name(), b.branch_name())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{paginate, PageRequest, SortDirection};

    fn vehicle(id: i32, brand: &str, year: i32, mileage: Option<i64>) -> Vehicle {
        Vehicle {
            id,
            brand: brand.into(),
            model: "CG 160".into(),
            year,
            plate: format!("ABC-{:04}", id),
            branch_id: 1,
            color: None,
            mileage,
            branch: None,
        }
    }

    #[test]
    fn sort_by_year_descending() {
        let records = vec![
            vehicle(1, "Honda", 2019, None),
            vehicle(2, "Yamaha", 2023, Some(100)),
            vehicle(3, "Honda", 2021, Some(50)),
        ];
        let req = PageRequest::default().with_sort(Some("Year".into()), SortDirection::Desc);
        let ids: Vec<i32> = paginate(records, &req, &VehicleQueryRules)
            .items()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn search_matches_plate() {
        let records = vec![vehicle(1, "Honda", 2019, None), vehicle(2, "Honda", 2020, None)];
        let req = PageRequest::default().with_search(Some("abc-0002".into()));
        let page = paginate(records, &req, &VehicleQueryRules);
        assert_eq!(page.total_items(), 1);
        assert_eq!(page.items()[0].id, 2);
    }
}
