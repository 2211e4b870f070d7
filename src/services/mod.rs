pub mod person_service;
