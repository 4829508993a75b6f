#[derive(Debug, Clone)]
pub struct Execute;
