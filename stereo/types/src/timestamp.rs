/*!
    Presentation timestamps.
*/

/**
    Presentation timestamp in time_base units.

    Frames carry the decoder's timestamp through the layout transform
    unchanged. The encoder restamps frames by index, so this is only
    used for diagnostics.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pts(pub i64);
