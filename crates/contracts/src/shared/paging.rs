//! Paged list DTOs shared with the collaborator endpoints

use serde::{Deserialize, Serialize};

/// One page of a collaborator list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    #[serde(rename = "totalRegistros")]
    pub total_registros: u64,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total_registros: u64) -> Self {
        Self {
            data,
            total_registros,
        }
    }

    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total_registros, page_size)
    }
}

/// `ceil(total / page_size)`, 0 when there are no records
pub fn total_pages(total_records: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    ((total_records + page_size as u64 - 1) / page_size as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(15, 10), 2);
        assert_eq!(total_pages(21, 10), 3);
    }

    #[test]
    fn paged_response_roundtrip() {
        let json = r#"{"data":[1,2,3],"totalRegistros":15}"#;
        let page: PagedResponse<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.total_registros, 15);
        assert_eq!(page.total_pages(10), 2);
    }
}
