//! Animatable visual properties

use std::fmt;
use std::str::FromStr;

use crate::error::DomError;

/// A visual property an effect can write to an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Horizontal translation as a percentage of the element's own width
    XPercent,
    /// Vertical translation as a percentage of the element's own height
    YPercent,
    /// Uniform scale factor
    Scale,
    /// Horizontal scale factor
    ScaleX,
    /// Vertical scale factor
    ScaleY,
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Left position as a percentage of the containing block
    Left,
    /// Top position as a percentage of the containing block
    Top,
    /// Vertical offset applied while the element is pinned in the viewport
    PinY,
}

impl Property {
    /// Every property, in serialization order
    pub const ALL: [Property; 11] = [
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::YPercent,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::Opacity,
        Property::Left,
        Property::Top,
        Property::PinY,
    ];

    /// The name used in binding descriptors (`x`, `yPercent`, `scaleX`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "xPercent",
            Property::YPercent => "yPercent",
            Property::Scale => "scale",
            Property::ScaleX => "scaleX",
            Property::ScaleY => "scaleY",
            Property::Opacity => "opacity",
            Property::Left => "left",
            Property::Top => "top",
            Property::PinY => "pinY",
        }
    }

    /// Value an element has before anything writes the property
    pub fn default_value(&self) -> f32 {
        match self {
            Property::Scale | Property::ScaleX | Property::ScaleY | Property::Opacity => 1.0,
            _ => 0.0,
        }
    }

    /// The percentage counterpart of a pixel translation, if any
    pub fn percent_variant(&self) -> Option<Property> {
        match self {
            Property::X => Some(Property::XPercent),
            Property::Y => Some(Property::YPercent),
            _ => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| DomError::UnknownProperty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("yPercent".parse::<Property>(), Ok(Property::YPercent));
        assert_eq!("scaleX".parse::<Property>(), Ok(Property::ScaleX));
        assert!("rotation".parse::<Property>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Property::Opacity.default_value(), 1.0);
        assert_eq!(Property::Scale.default_value(), 1.0);
        assert_eq!(Property::Y.default_value(), 0.0);
        assert_eq!(Property::Y.percent_variant(), Some(Property::YPercent));
        assert_eq!(Property::Opacity.percent_variant(), None);
    }
}
