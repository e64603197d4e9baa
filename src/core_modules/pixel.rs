// THEORY:
// A `Pixel` is the color value that moves through the resampler. Only the three
// color channels take part in blending; alpha is a property of the buffer a
// pixel is stored in (always opaque for cube faces), so it is not carried here.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    /// Bytes per texel in every `PixelBuffer` (R, G, B, A).
    pub const CHANNELS: usize = 4;
    /// Alpha written into freshly allocated buffers.
    pub const OPAQUE: Channel = 255;

    /// An RGB color sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    impl Pixel {
        pub const BLACK: Pixel = Pixel::new(0, 0, 0);

        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }
    }

    impl From<[Channel; 3]> for Pixel {
        fn from(rgb: [Channel; 3]) -> Self {
            Pixel::new(rgb[0], rgb[1], rgb[2])
        }
    }

    impl From<Pixel> for [Channel; 3] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue]
        }
    }

}
