// Only a single-step sale is modelled. There are no Authorize or Capture flows.
#[derive(Debug, Clone)]
pub struct Purchase;
