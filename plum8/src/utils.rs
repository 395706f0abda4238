pub mod testing {
    use core::fmt;

    use crate::frame::{FrameView, HEIGHT, WIDTH};

    #[derive(Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ImageMask([[bool; WIDTH]; HEIGHT]);

    impl ImageMask {
        pub fn new() -> Self {
            Self([[false; WIDTH]; HEIGHT])
        }
    }

    impl fmt::Debug for ImageMask {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let width = WIDTH + 2;
            writeln!(f)?;
            for _ in 0..width {
                write!(f, "-")?;
            }
            writeln!(f)?;
            for row in &self.0 {
                write!(f, "|")?;
                row.iter()
                    .map(|&p| if p { write!(f, "#") } else { write!(f, " ") })
                    .fold(Ok(()), |acc, r| acc.and(r))?;
                writeln!(f, "|")?;
            }
            for _ in 0..width {
                write!(f, "-")?;
            }
            Ok(())
        }
    }

    pub trait ToMask {
        fn to_mask(&self) -> ImageMask;
    }

    /// Rows separated by whitespace, `#` marks a lit pixel
    impl ToMask for str {
        fn to_mask(&self) -> ImageMask {
            let mut mask = ImageMask::new();
            mask.0
                .iter_mut()
                .zip(self.split_whitespace())
                .for_each(|(m_row, c_row)| {
                    m_row
                        .iter_mut()
                        .zip(c_row.chars())
                        .for_each(|(m, c)| *m = c == '#')
                });
            mask
        }
    }

    impl ToMask for FrameView<'_> {
        fn to_mask(&self) -> ImageMask {
            let mut mask = ImageMask::new();
            self.iter_rows_as_bitslices()
                .zip(mask.0.iter_mut())
                .for_each(|(f_row, m_row)| {
                    m_row
                        .iter_mut()
                        .zip(f_row.iter())
                        .for_each(|(m, bit)| *m = *bit)
                });
            mask
        }
    }

    mod tests {
        use super::*;
        use crate::frame::Frame;

        #[test]
        fn to_image_mask() {
            let mut frame = Frame::new();
            assert_eq!(ImageMask::new(), frame.view().to_mask());
            assert_eq!("........".to_mask(), frame.view().to_mask());

            frame.toggle_pixel(1, 0);
            frame.toggle_pixel(0, 1);
            frame.toggle_pixel(2, 1);
            let expected = "
                .#..
                #.#.
            ";
            assert_eq!(expected.to_mask(), frame.view().to_mask());
        }
    }
}
