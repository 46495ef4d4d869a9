/// 0-indexed city. TSPLIB benchmark instances stay well below u16::MAX.
pub type City = u16;

/// Tour or edge cost. TSPLIB EUC_2D weights are rounded to whole numbers,
/// but the distance matrix contract is real-valued.
pub type Cost = f64;

/// An ordered sequence of cities. A complete tour visits every city once
/// and implicitly closes from the last city back to the first.
pub type Tour = Vec<City>;
