// Presentation of pricing state for whoever owns the view.

pub mod report;
